// crates/virtxml-rs/src/model/mod.rs

//! The schema catalogue: typed records and descriptor tables for the domain
//! document and its detachable devices.
//!
//! Everything in this module tree is data; the engine supplies the
//! behavior. Declaration order inside each table is wire order, so the
//! tables below are laid out exactly as the documents read.

use crate::descriptor::CheckFn;
use crate::error::SchemaError;
use std::sync::Once;

/// Builds one descriptor-table entry. The shape token names the backing
/// storage: `str`/`opt_str` for literal strings, `u64`/`opt_u64`/
/// `omit0_u64`/`opt_hex` for unsigned integers, `opt_i64` for signed.
macro_rules! field {
    // --- attributes ---
    (attr $name:literal, $owner:ty, opt_str $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Literal,
            |o: &$owner| o.$f.as_deref().map($crate::descriptor::Value::Str),
            |o: &mut $owner, v| {
                o.$f = Some(v.text()?);
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, str $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Required,
            $crate::descriptor::Format::Literal,
            |o: &$owner| Some($crate::descriptor::Value::Str(o.$f.as_str())),
            |o: &mut $owner, v| {
                o.$f = v.text()?;
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, opt_u64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Plain,
            |o: &$owner| o.$f.map($crate::descriptor::Value::Uint),
            |o: &mut $owner, v| {
                o.$f = Some(v.uint()?);
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, u64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Required,
            $crate::descriptor::Format::Plain,
            |o: &$owner| Some($crate::descriptor::Value::Uint(o.$f)),
            |o: &mut $owner, v| {
                o.$f = v.uint()?;
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, omit0_u64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::OmitIfZero,
            $crate::descriptor::Format::Plain,
            |o: &$owner| Some($crate::descriptor::Value::Uint(o.$f)),
            |o: &mut $owner, v| {
                o.$f = v.uint()?;
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, opt_hex $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Hex,
            |o: &$owner| o.$f.map($crate::descriptor::Value::Uint),
            |o: &mut $owner, v| {
                o.$f = Some(v.uint()?);
                Ok(())
            },
        )
    };
    (attr $name:literal, $owner:ty, opt_i64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::attr(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Plain,
            |o: &$owner| o.$f.map($crate::descriptor::Value::Int),
            |o: &mut $owner, v| {
                o.$f = Some(v.int()?);
                Ok(())
            },
        )
    };

    // --- child elements holding only text ---
    (ctext $name:literal, $owner:ty, opt_str $f:ident) => {
        $crate::descriptor::FieldDescriptor::child_text(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Literal,
            |o: &$owner| o.$f.as_deref().map($crate::descriptor::Value::Str),
            |o: &mut $owner, v| {
                o.$f = Some(v.text()?);
                Ok(())
            },
        )
    };
    (ctext $name:literal, $owner:ty, opt_u64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::child_text(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Plain,
            |o: &$owner| o.$f.map($crate::descriptor::Value::Uint),
            |o: &mut $owner, v| {
                o.$f = Some(v.uint()?);
                Ok(())
            },
        )
    };
    (ctext $name:literal, $owner:ty, opt_i64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::child_text(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Plain,
            |o: &$owner| o.$f.map($crate::descriptor::Value::Int),
            |o: &mut $owner, v| {
                o.$f = Some(v.int()?);
                Ok(())
            },
        )
    };

    // --- the owning element's own text content ---
    (text $owner:ty, opt_str $f:ident) => {
        $crate::descriptor::FieldDescriptor::text(
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::Format::Literal,
            |o: &$owner| o.$f.as_deref().map($crate::descriptor::Value::Str),
            |o: &mut $owner, v| {
                o.$f = Some(v.text()?);
                Ok(())
            },
        )
    };
    (text $owner:ty, u64 $f:ident) => {
        $crate::descriptor::FieldDescriptor::text(
            $crate::descriptor::Presence::Required,
            $crate::descriptor::Format::Plain,
            |o: &$owner| Some($crate::descriptor::Value::Uint(o.$f)),
            |o: &mut $owner, v| {
                o.$f = v.uint()?;
                Ok(())
            },
        )
    };

    // --- presence-flag child (<readonly/>) ---
    (flag $name:literal, $owner:ty, $f:ident) => {
        $crate::descriptor::FieldDescriptor::child(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::ChildAccess {
                encode: |o: &$owner, name| Ok(o.$f.then(|| $crate::tree::Element::new(name))),
                decode: |o: &mut $owner, _el| {
                    o.$f = true;
                    Ok(())
                },
                check: None,
            },
        )
    };

    // --- nested sub-documents ---
    (child $name:literal, $owner:ty, $f:ident: $c:ty) => {
        $crate::descriptor::FieldDescriptor::child(
            $name,
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::ChildAccess {
                encode: |o: &$owner, name| match &o.$f {
                    Some(v) => Ok(Some($crate::encode::to_element(name, v)?)),
                    None => Ok(None),
                },
                decode: |o: &mut $owner, el| {
                    o.$f = Some($crate::decode::from_element(el)?);
                    Ok(())
                },
                check: Some($crate::descriptor::deep_check::<$c>),
            },
        )
    };
    (child_req $name:literal, $owner:ty, $f:ident: $c:ty) => {
        $crate::descriptor::FieldDescriptor::child(
            $name,
            $crate::descriptor::Presence::Required,
            $crate::descriptor::ChildAccess {
                encode: |o: &$owner, name| Ok(Some($crate::encode::to_element(name, &o.$f)?)),
                decode: |o: &mut $owner, el| {
                    o.$f = $crate::decode::from_element(el)?;
                    Ok(())
                },
                check: Some($crate::descriptor::deep_check::<$c>),
            },
        )
    };

    // --- ordered sequences of same-named children ---
    (many $name:literal, $owner:ty, $f:ident: $c:ty) => {
        $crate::descriptor::FieldDescriptor::repeated(
            $name,
            $crate::descriptor::RepeatedAccess {
                encode: |o: &$owner, name| {
                    o.$f
                        .iter()
                        .map(|v| $crate::encode::to_element(name, v))
                        .collect()
                },
                decode: |o: &mut $owner, el| {
                    o.$f.push($crate::decode::from_element(el)?);
                    Ok(())
                },
                check: Some($crate::descriptor::deep_check::<$c>),
            },
        )
    };
    (many_text $name:literal, $owner:ty, $f:ident) => {
        $crate::descriptor::FieldDescriptor::repeated(
            $name,
            $crate::descriptor::RepeatedAccess {
                encode: |o: &$owner, name| {
                    Ok(o.$f
                        .iter()
                        .map(|v| $crate::tree::Element::with_text(name, v.clone()))
                        .collect())
                },
                decode: |o: &mut $owner, el| {
                    o.$f.push(el.text.clone().unwrap_or_default());
                    Ok(())
                },
                check: None,
            },
        )
    };
}

/// Implements `ConfigNode` for a record from a list of `field!` entries.
macro_rules! table {
    ($ty:ident { $($fields:expr),* $(,)? }) => {
        impl $crate::descriptor::ConfigNode for $ty {
            const NAME: &'static str = stringify!($ty);
            fn fields() -> &'static [$crate::descriptor::FieldDescriptor<Self>] {
                const FIELDS: &[$crate::descriptor::FieldDescriptor<$ty>] = &[$($fields),*];
                FIELDS
            }
        }
    };
}

/// The `<address type="...">` variant group, shared by every device that
/// can carry one. Exactly one shape may be populated; the sum type makes
/// that structural.
macro_rules! device_address {
    ($owner:ty, $f:ident) => {
        $crate::descriptor::FieldDescriptor::group(
            "address",
            $crate::descriptor::Presence::Optional,
            $crate::descriptor::GroupSpec {
                discriminator: Some("type"),
                members: &[
                    $crate::descriptor::GroupMember {
                        tag: "pci",
                        present: |o: &$owner| {
                            matches!(o.$f, Some($crate::model::address::DeviceAddress::Pci(_)))
                        },
                        encode: |o: &$owner, el| {
                            if let Some($crate::model::address::DeviceAddress::Pci(a)) = &o.$f {
                                $crate::encode::fill(el, a)?;
                            }
                            Ok(())
                        },
                        decode: |o: &mut $owner, el| {
                            o.$f = Some($crate::model::address::DeviceAddress::Pci(
                                $crate::decode::from_element(el)?,
                            ));
                            Ok(())
                        },
                        check: Some(
                            $crate::descriptor::deep_check::<$crate::model::address::PciAddress>,
                        ),
                    },
                    $crate::descriptor::GroupMember {
                        tag: "drive",
                        present: |o: &$owner| {
                            matches!(o.$f, Some($crate::model::address::DeviceAddress::Drive(_)))
                        },
                        encode: |o: &$owner, el| {
                            if let Some($crate::model::address::DeviceAddress::Drive(a)) = &o.$f {
                                $crate::encode::fill(el, a)?;
                            }
                            Ok(())
                        },
                        decode: |o: &mut $owner, el| {
                            o.$f = Some($crate::model::address::DeviceAddress::Drive(
                                $crate::decode::from_element(el)?,
                            ));
                            Ok(())
                        },
                        check: Some(
                            $crate::descriptor::deep_check::<$crate::model::address::DriveAddress>,
                        ),
                    },
                    $crate::descriptor::GroupMember {
                        tag: "usb",
                        present: |o: &$owner| {
                            matches!(o.$f, Some($crate::model::address::DeviceAddress::Usb(_)))
                        },
                        encode: |o: &$owner, el| {
                            if let Some($crate::model::address::DeviceAddress::Usb(a)) = &o.$f {
                                $crate::encode::fill(el, a)?;
                            }
                            Ok(())
                        },
                        decode: |o: &mut $owner, el| {
                            o.$f = Some($crate::model::address::DeviceAddress::Usb(
                                $crate::decode::from_element(el)?,
                            ));
                            Ok(())
                        },
                        check: Some(
                            $crate::descriptor::deep_check::<$crate::model::address::UsbAddress>,
                        ),
                    },
                    $crate::descriptor::GroupMember {
                        tag: "dimm",
                        present: |o: &$owner| {
                            matches!(o.$f, Some($crate::model::address::DeviceAddress::Dimm(_)))
                        },
                        encode: |o: &$owner, el| {
                            if let Some($crate::model::address::DeviceAddress::Dimm(a)) = &o.$f {
                                $crate::encode::fill(el, a)?;
                            }
                            Ok(())
                        },
                        decode: |o: &mut $owner, el| {
                            o.$f = Some($crate::model::address::DeviceAddress::Dimm(
                                $crate::decode::from_element(el)?,
                            ));
                            Ok(())
                        },
                        check: Some(
                            $crate::descriptor::deep_check::<$crate::model::address::DimmAddress>,
                        ),
                    },
                ],
            },
        )
    };
}

/// Marks a type as an independently encodable document root.
macro_rules! document {
    ($ty:ty, $root:literal) => {
        impl $crate::document::Document for $ty {
            const ROOT: &'static str = $root;
            fn startup_check() {
                $crate::model::ensure_valid();
            }
        }
    };
}

pub mod address;
pub mod devices;
pub mod domain;

pub use address::{DeviceAddress, DimmAddress, DriveAddress, PciAddress, UsbAddress};
pub use devices::*;
pub use domain::*;

/// Validates every descriptor table in the catalogue, recursively. Intended
/// for startup and for the test suite; the tables are static, so a failure
/// is a bug in this module.
pub fn validate() -> Result<(), SchemaError> {
    use crate::descriptor::deep_check;
    let checks: &[CheckFn] = &[
        deep_check::<Domain>,
        deep_check::<Disk>,
        deep_check::<Controller>,
        deep_check::<Filesystem>,
        deep_check::<Interface>,
        deep_check::<Serial>,
        deep_check::<Console>,
        deep_check::<Channel>,
        deep_check::<Input>,
        deep_check::<Graphics>,
        deep_check::<Video>,
        deep_check::<Sound>,
        deep_check::<Rng>,
        deep_check::<MemBalloon>,
        deep_check::<Hostdev>,
        deep_check::<Memorydev>,
    ];
    for check in checks {
        check()?;
    }
    Ok(())
}

pub(crate) fn ensure_valid() {
    static CHECK: Once = Once::new();
    CHECK.call_once(|| {
        if let Err(e) = validate() {
            panic!("defective descriptor table: {}", e);
        }
    });
}

document!(domain::Domain, "domain");
document!(devices::Disk, "disk");
document!(devices::Controller, "controller");
document!(devices::Filesystem, "filesystem");
document!(devices::Interface, "interface");
document!(devices::Serial, "serial");
document!(devices::Console, "console");
document!(devices::Channel, "channel");
document!(devices::Input, "input");
document!(devices::Graphics, "graphics");
document!(devices::Video, "video");
document!(devices::Sound, "sound");
document!(devices::Rng, "rng");
document!(devices::MemBalloon, "memballoon");
document!(devices::Hostdev, "hostdev");
document!(devices::Memorydev, "memory");

#[cfg(test)]
mod tests {
    #[test]
    fn catalogue_tables_are_consistent() {
        super::validate().expect("catalogue descriptor tables must validate");
    }
}
