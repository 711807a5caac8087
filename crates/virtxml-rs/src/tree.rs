// crates/virtxml-rs/src/tree.rs

//! Generic markup tree produced by the encoder and consumed by the decoder.
//!
//! An [`Element`] carries no schema knowledge: attribute and child order is
//! whatever the producer inserted, which for encoded documents is exactly
//! the descriptor-table declaration order. Elements are transient values
//! scoped to a single encode/decode call.

/// One node of the markup tree.
///
/// `text` and non-empty `children` are mutually exclusive in this crate's
/// usage: an element carries either nested elements or direct text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Element tag name.
    pub name: String,
    /// Attributes in insertion order. Keys are unique.
    pub attributes: Vec<(String, String)>,
    /// Child elements in insertion order.
    pub children: Vec<Element>,
    /// Direct text content, if any.
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: Some(text.into()),
            ..Element::default()
        }
    }

    /// Appends an attribute. The caller guarantees key uniqueness; encoded
    /// documents get it from descriptor-table validation, parsed documents
    /// from the reader's duplicate check.
    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Looks up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child element with the given tag.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }
}
