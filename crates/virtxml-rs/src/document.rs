// crates/virtxml-rs/src/document.rs

//! Top-level entry points for independently encodable root types.

use crate::decode;
use crate::descriptor::ConfigNode;
use crate::encode;
use crate::error::{DecodeError, EncodeError};
use crate::markup;
use log::debug;

/// A configuration type that stands alone as a complete document: the full
/// domain, or a detachable device that can be hot-plugged on its own.
pub trait Document: ConfigNode {
    /// Root element name.
    const ROOT: &'static str;

    /// One-time descriptor-table validation hook, run before the first
    /// marshal/unmarshal. A defective table panics here; tables are static
    /// data, so this is a crate bug, never an input error.
    fn startup_check();

    /// Encodes and renders this object as a complete document.
    fn marshal(&self) -> Result<String, EncodeError> {
        Self::startup_check();
        debug!("encoding <{}> document", Self::ROOT);
        let el = encode::to_element(Self::ROOT, self)?;
        markup::render(&el)
    }

    /// Parses and decodes a complete document into a fresh object.
    fn unmarshal(text: &str) -> Result<Self, DecodeError> {
        Self::startup_check();
        debug!("decoding <{}> document", Self::ROOT);
        let el = markup::parse(text)?;
        if el.name != Self::ROOT {
            return Err(DecodeError::UnexpectedRoot {
                expected: Self::ROOT,
                found: el.name,
            });
        }
        decode::from_element(&el)
    }
}
