// crates/virtxml-rs/src/error.rs

use core::fmt;
use quick_xml::Error as XmlError;
use quick_xml::events::attributes::AttrError;

/// Errors raised while encoding a typed object into a document.
///
/// Every variant except `Write` indicates a caller programming error: the
/// object handed to the encoder violates the schema's invariants. These are
/// never produced by well-formed input data.
#[derive(Debug)]
pub enum EncodeError {
    /// A field marked required held no value.
    MissingField {
        element: String,
        field: &'static str,
    },

    /// More than one member of a variant group was populated at once.
    ConflictingVariants {
        element: String,
        group: &'static str,
    },

    /// The underlying XML writer failed (e.g. I/O).
    Write(std::io::Error),

    /// An error from the underlying `quick-xml` machinery.
    Xml(XmlError),
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        EncodeError::Write(e)
    }
}

impl From<XmlError> for EncodeError {
    fn from(e: XmlError) -> Self {
        EncodeError::Xml(e)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::MissingField { element, field } => {
                write!(f, "required field '{}' of <{}> is not set", field, element)
            }
            EncodeError::ConflictingVariants { element, group } => {
                write!(
                    f,
                    "more than one variant of group '{}' in <{}> is populated",
                    group, element
                )
            }
            EncodeError::Write(e) => write!(f, "XML writing error: {}", e),
            EncodeError::Xml(e) => write!(f, "XML error: {}", e),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Write(e) => Some(e),
            EncodeError::Xml(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised while decoding a document into a typed object.
///
/// These describe malformed input and are recoverable by the caller; the
/// partially decoded destination object must be discarded on any error.
#[derive(Debug)]
pub enum DecodeError {
    /// An error from the underlying `quick-xml` reader.
    Xml(XmlError),

    /// An attribute was malformed or duplicated in the markup.
    Attr(AttrError),

    /// The input contained no root element.
    EmptyDocument,

    /// The input contained more than one root element.
    MultipleRoots,

    /// The input ended before an element was closed.
    UnclosedElement { element: String },

    /// The root element does not match the document type being decoded.
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A required child element was missing.
    MissingElement {
        parent: String,
        element: &'static str,
    },

    /// A required attribute was missing.
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A required text content was missing.
    MissingText { element: String },

    /// A non-repeatable element occurred more than once.
    DuplicateElement {
        parent: String,
        element: &'static str,
    },

    /// An attribute name occurred more than once on one element.
    DuplicateAttribute { element: String, attribute: String },

    /// An attribute or text value did not parse in its declared format.
    InvalidValue {
        element: String,
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl From<XmlError> for DecodeError {
    fn from(e: XmlError) -> Self {
        DecodeError::Xml(e)
    }
}

impl From<AttrError> for DecodeError {
    fn from(e: AttrError) -> Self {
        DecodeError::Attr(e)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Xml(e) => write!(f, "XML parsing error: {}", e),
            DecodeError::Attr(e) => write!(f, "XML attribute error: {}", e),
            DecodeError::EmptyDocument => write!(f, "document has no root element"),
            DecodeError::MultipleRoots => write!(f, "document has more than one root element"),
            DecodeError::UnclosedElement { element } => {
                write!(f, "element <{}> is never closed", element)
            }
            DecodeError::UnexpectedRoot { expected, found } => {
                write!(f, "expected root element <{}>, found <{}>", expected, found)
            }
            DecodeError::MissingElement { parent, element } => {
                write!(f, "missing required element <{}> in <{}>", element, parent)
            }
            DecodeError::MissingAttribute { element, attribute } => {
                write!(
                    f,
                    "missing required attribute '{}' on <{}>",
                    attribute, element
                )
            }
            DecodeError::MissingText { element } => {
                write!(f, "missing required text content in <{}>", element)
            }
            DecodeError::DuplicateElement { parent, element } => {
                write!(
                    f,
                    "element <{}> occurs more than once in <{}>",
                    element, parent
                )
            }
            DecodeError::DuplicateAttribute { element, attribute } => {
                write!(
                    f,
                    "attribute '{}' occurs more than once on <{}>",
                    attribute, element
                )
            }
            DecodeError::InvalidValue {
                element,
                name,
                value,
                expected,
            } => write!(
                f,
                "invalid value \"{}\" for '{}' on <{}>: expected {}",
                value, name, element, expected
            ),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Xml(e) => Some(e),
            _ => None,
        }
    }
}

/// Defects in a descriptor table itself.
///
/// A table is static data shipped with the crate; any of these indicates a
/// bug in the table, not in external input. The catalogue is checked once
/// at first use and a defect aborts via panic.
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    DuplicateAttribute {
        table: &'static str,
        name: &'static str,
    },
    DuplicateChild {
        table: &'static str,
        name: &'static str,
    },
    DuplicateVariant {
        table: &'static str,
        group: &'static str,
        tag: &'static str,
    },
    EmptyGroup {
        table: &'static str,
        group: &'static str,
    },
    DuplicateText { table: &'static str },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateAttribute { table, name } => {
                write!(f, "{}: duplicate attribute name '{}'", table, name)
            }
            SchemaError::DuplicateChild { table, name } => {
                write!(f, "{}: duplicate child element name '{}'", table, name)
            }
            SchemaError::DuplicateVariant { table, group, tag } => {
                write!(
                    f,
                    "{}: duplicate variant tag '{}' in group '{}'",
                    table, tag, group
                )
            }
            SchemaError::EmptyGroup { table, group } => {
                write!(f, "{}: variant group '{}' has no members", table, group)
            }
            SchemaError::DuplicateText { table } => {
                write!(f, "{}: more than one text-content field", table)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_error_display_names_the_field() {
        let err = EncodeError::MissingField {
            element: "mac".into(),
            field: "address",
        };
        assert_eq!(err.to_string(), "required field 'address' of <mac> is not set");
    }

    #[test]
    fn decode_error_from_xml_error() {
        // Mismatched end tags are rejected by the reader itself.
        let mut reader = quick_xml::Reader::from_str("<a></b>");
        let xml_err = loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Eof) => panic!("expected a parse error"),
                Ok(_) => continue,
                Err(e) => break e,
            }
        };
        let err: DecodeError = xml_err.into();
        assert!(matches!(err, DecodeError::Xml(_)));
    }

    #[test]
    fn invalid_value_display_names_element_and_shape() {
        let err = DecodeError::InvalidValue {
            element: "address".into(),
            name: "slot",
            value: "3".into(),
            expected: "0x-prefixed hexadecimal integer",
        };
        let msg = err.to_string();
        assert!(msg.contains("slot"));
        assert!(msg.contains("address"));
        assert!(msg.contains("0x-prefixed"));
    }
}
