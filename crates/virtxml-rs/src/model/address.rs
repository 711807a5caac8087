// crates/virtxml-rs/src/model/address.rs

//! Device address shapes.
//!
//! One logical "where does this device sit" concept with several mutually
//! exclusive layouts, selected on the wire by the `type` attribute of a
//! shared `<address>` element. PCI registers and the DIMM base render in
//! hexadecimal; drive and USB coordinates are decimal.

/// The address carried by a device, one shape at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAddress {
    Pci(PciAddress),
    Drive(DriveAddress),
    Usb(UsbAddress),
    Dimm(DimmAddress),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PciAddress {
    pub domain: Option<u64>,
    pub bus: Option<u64>,
    pub slot: Option<u64>,
    pub function: Option<u64>,
}

table!(PciAddress {
    field!(attr "domain", PciAddress, opt_hex domain),
    field!(attr "bus", PciAddress, opt_hex bus),
    field!(attr "slot", PciAddress, opt_hex slot),
    field!(attr "function", PciAddress, opt_hex function),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveAddress {
    pub controller: Option<u64>,
    pub bus: Option<u64>,
    pub target: Option<u64>,
    pub unit: Option<u64>,
}

table!(DriveAddress {
    field!(attr "controller", DriveAddress, opt_u64 controller),
    field!(attr "bus", DriveAddress, opt_u64 bus),
    field!(attr "target", DriveAddress, opt_u64 target),
    field!(attr "unit", DriveAddress, opt_u64 unit),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsbAddress {
    pub bus: Option<u64>,
    pub port: Option<u64>,
}

table!(UsbAddress {
    field!(attr "bus", UsbAddress, opt_u64 bus),
    field!(attr "port", UsbAddress, opt_u64 port),
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimmAddress {
    pub slot: Option<u64>,
    pub base: Option<u64>,
}

table!(DimmAddress {
    field!(attr "slot", DimmAddress, opt_u64 slot),
    field!(attr "base", DimmAddress, opt_hex base),
});
