// crates/virtxml-rs/src/markup.rs

//! Text ⇄ tree conversion on top of `quick-xml`'s event API.
//!
//! Rendering conventions are fixed crate-wide: two-space nested indentation,
//! double-quoted attribute values, self-closing empty elements, text content
//! inline with its tags, no XML declaration. Round-trip stability of
//! marshalled documents is defined against exactly these conventions.

use crate::error::{DecodeError, EncodeError};
use crate::tree::Element;
use log::trace;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Renders a tree to text.
pub fn render(root: &Element) -> Result<String, EncodeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner();
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    el: &Element,
) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() && el.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &el.text {
        writer.write_event(Event::Text(BytesText::new(text.as_str())))?;
    }
    for child in &el.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))?;
    Ok(())
}

/// Parses text into a tree, preserving attribute and child order.
///
/// Declarations, comments and processing instructions are skipped; CDATA
/// folds into text content. Duplicate attributes, mismatched tags and
/// multiple root elements are rejected.
pub fn parse(text: &str) -> Result<Element, DecodeError> {
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let el = element_from_start(&e)?;
                stack.push(el);
            }
            Event::Empty(e) => {
                let el = element_from_start(&e)?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(_) => {
                // Tag balance is enforced by the reader; an End event always
                // matches the element on top of the stack.
                if let Some(mut el) = stack.pop() {
                    strip_formatting_text(&mut el);
                    attach(&mut stack, &mut root, el)?;
                }
            }
            Event::Text(e) => {
                let unescaped = e.decode().map_err(|e| DecodeError::Xml(e.into()))?;
                append_text(&mut stack, &unescaped);
            }
            Event::CData(e) => {
                let raw = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut stack, &raw);
            }
            Event::GeneralRef(e) => {
                // Entity references surfaced as standalone events resolve to
                // the same text content `unescape` would have produced.
                let name = String::from_utf8_lossy(&e).into_owned();
                match resolve_entity(&name) {
                    Some(resolved) => append_text(&mut stack, &resolved),
                    None => trace!("ignoring unknown entity reference &{};", name),
                }
            }
            Event::Eof => break,
            // Decl, DocType, Comment, PI carry nothing the tree model keeps.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DecodeError::UnclosedElement { element: open.name });
    }
    root.ok_or(DecodeError::EmptyDocument)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, DecodeError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DecodeError::Xml(e.into()))?
            .into_owned();
        if el.attr(&key).is_some() {
            return Err(DecodeError::DuplicateAttribute {
                element: el.name.clone(),
                attribute: key,
            });
        }
        el.push_attr(key, value);
    }
    Ok(el)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(el);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(el);
            Ok(())
        }
        None => Err(DecodeError::MultipleRoots),
    }
}

/// Indentation between child elements arrives as whitespace-only text;
/// drop it so formatting does not leak into the tree. Text content of leaf
/// elements is kept verbatim.
fn strip_formatting_text(el: &mut Element) {
    if !el.children.is_empty()
        && el
            .text
            .as_deref()
            .is_some_and(|t| t.chars().all(char::is_whitespace))
    {
        el.text = None;
    }
}

/// Resolves a predefined (`amp`, `lt`, ...) or character (`#10`, `#x2019`)
/// entity reference by name, without the surrounding `&`/`;`.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse::<u32>().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    quick_xml::escape::resolve_predefined_entity(name).map(str::to_owned)
}

fn append_text(stack: &mut [Element], text: &str) {
    match stack.last_mut() {
        Some(parent) => match &mut parent.text {
            Some(existing) => existing.push_str(text),
            None => parent.text = Some(text.to_owned()),
        },
        None => trace!("ignoring stray text outside the root element"),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, render};
    use crate::error::DecodeError;
    use crate::tree::Element;

    fn sample_tree() -> Element {
        let mut root = Element::new("domain");
        root.push_attr("type", "kvm");
        root.children.push(Element::with_text("name", "test"));
        let mut devices = Element::new("devices");
        let mut disk = Element::new("disk");
        disk.push_attr("type", "file");
        devices.children.push(disk);
        root.children.push(devices);
        root
    }

    #[test]
    fn render_uses_two_space_indent_and_inline_text() {
        let text = render(&sample_tree()).unwrap();
        assert_eq!(
            text,
            "<domain type=\"kvm\">\n  <name>test</name>\n  <devices>\n    <disk type=\"file\"/>\n  </devices>\n</domain>"
        );
    }

    #[test]
    fn parse_round_trips_render() {
        let tree = sample_tree();
        let text = render(&tree).unwrap();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, tree);
        assert_eq!(render(&reparsed).unwrap(), text);
    }

    #[test]
    fn parse_preserves_attribute_order() {
        let el = parse(r#"<address type="pci" domain="0x0" bus="0x0" slot="0x3"/>"#).unwrap();
        let keys: Vec<&str> = el.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["type", "domain", "bus", "slot"]);
    }

    #[test]
    fn parse_accepts_explicit_close_of_empty_element() {
        let a = parse("<readonly></readonly>").unwrap();
        let b = parse("<readonly/>").unwrap();
        assert_eq!(a, b);
        assert!(a.text.is_none());
    }

    #[test]
    fn escaped_text_and_attributes_round_trip() {
        let mut el = Element::new("description");
        el.push_attr("note", "a<b & \"c\"");
        el.text = Some("x < y && y > z".into());
        let text = render(&el).unwrap();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, el);
    }

    #[test]
    fn parse_rejects_duplicate_attributes() {
        let err = parse(r#"<disk type="file" type="block"/>"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DuplicateAttribute { .. } | DecodeError::Attr(_) | DecodeError::Xml(_)
        ));
    }

    #[test]
    fn parse_rejects_multiple_roots() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, DecodeError::MultipleRoots));
    }

    #[test]
    fn parse_rejects_unclosed_element() {
        let err = parse("<domain><name>test</name>").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnclosedElement { .. } | DecodeError::Xml(_)
        ));
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, DecodeError::EmptyDocument));
    }

    #[test]
    fn declarations_and_comments_are_skipped() {
        let el = parse("<?xml version=\"1.0\"?><!-- vm --><domain type=\"kvm\"/>").unwrap();
        assert_eq!(el.name, "domain");
        assert_eq!(el.attr("type"), Some("kvm"));
    }
}
