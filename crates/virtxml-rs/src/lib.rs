// crates/virtxml-rs/src/lib.rs

//! Typed document model for libvirt-style domain XML.
//!
//! A configuration is an ordinary Rust value; marshalling walks a static
//! descriptor table to produce the document, and unmarshalling walks the
//! same table to rebuild the value, bit-for-bit:
//!
//! ```
//! use virtxml_rs::{Document, Domain};
//!
//! let domain = Domain {
//!     kind: Some("kvm".into()),
//!     name: Some("test".into()),
//!     ..Domain::default()
//! };
//! let xml = domain.marshal().unwrap();
//! assert_eq!(xml, "<domain type=\"kvm\">\n  <name>test</name>\n</domain>");
//! assert_eq!(Domain::unmarshal(&xml).unwrap(), domain);
//! ```
//!
//! Optional fields distinguish "absent" from "present with a zero value":
//! an unset field never appears in the document, and an explicit zero is
//! preserved. Unknown attributes and elements in input are ignored, so
//! documents from newer producers still decode.

// --- Engine ---
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod markup;
pub mod tree;

mod document;
mod error;

// --- Schema catalogue ---
pub mod model;

// --- Top-level exports ---
pub use document::Document;
pub use error::{DecodeError, EncodeError, SchemaError};
pub use model::{
    Channel, Console, Controller, DeviceAddress, Devices, DimmAddress, Disk, Domain, DriveAddress,
    Filesystem, Graphics, Hostdev, Input, Interface, MemBalloon, Memorydev, PciAddress, Rng,
    Serial, Sound, UsbAddress, Video,
};
pub use tree::Element;
