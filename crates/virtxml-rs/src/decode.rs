// crates/virtxml-rs/src/decode.rs

//! Tree → typed object decoding.
//!
//! The decoder walks the same descriptor table as the encoder, in the same
//! order. Scalar values are validated before the destination field is
//! written; on any error the caller must discard the partially decoded
//! object. Unknown attributes and elements are tolerated and ignored so
//! documents from newer producers still decode.

use crate::descriptor::{
    Access, ConfigNode, FieldDescriptor, Format, GroupSpec, ParsedValue, Presence, ValueError,
};
use crate::error::DecodeError;
use crate::tree::Element;
use log::trace;

/// Decodes an element into a fresh, zero-valued typed object.
pub fn from_element<T: ConfigNode>(el: &Element) -> Result<T, DecodeError> {
    let mut value = T::default();
    read_into(el, &mut value)?;
    Ok(value)
}

/// Decodes an element's attributes and children into an existing object.
pub fn read_into<T: ConfigNode>(el: &Element, value: &mut T) -> Result<(), DecodeError> {
    for field in T::fields() {
        match &field.access {
            Access::Attribute(access) => match el.attr(field.name) {
                Some(raw) => {
                    let parsed = parse_scalar(&el.name, field.name, field.format, raw)?;
                    (access.set)(value, parsed)
                        .map_err(|e| invalid(&el.name, field.name, raw, e))?;
                }
                None => {
                    if field.presence == Presence::Required {
                        return Err(DecodeError::MissingAttribute {
                            element: el.name.clone(),
                            attribute: field.name,
                        });
                    }
                }
            },
            Access::Text(access) => match el.text.as_deref() {
                Some(raw) => {
                    let parsed = parse_scalar(&el.name, "text content", field.format, raw)?;
                    (access.set)(value, parsed)
                        .map_err(|e| invalid(&el.name, "text content", raw, e))?;
                }
                None => {
                    if field.presence == Presence::Required {
                        return Err(DecodeError::MissingText {
                            element: el.name.clone(),
                        });
                    }
                }
            },
            Access::ChildText(access) => {
                if let Some(child) = single_child(el, field)? {
                    // An empty element carries empty text, not absence: the
                    // element itself is the presence marker here.
                    let raw = child.text.as_deref().unwrap_or("");
                    let parsed = parse_scalar(&child.name, field.name, field.format, raw)?;
                    (access.set)(value, parsed)
                        .map_err(|e| invalid(&child.name, field.name, raw, e))?;
                }
            }
            Access::Child(child_access) => {
                if let Some(child) = single_child(el, field)? {
                    (child_access.decode)(value, child)?;
                }
            }
            Access::Repeated(repeated) => {
                for child in el.children_named(field.name) {
                    (repeated.decode)(value, child)?;
                }
            }
            Access::Group(group) => decode_group(el, field, group, value)?,
        }
    }
    log_unknown(el, T::fields());
    Ok(())
}

/// Finds the single child matching a non-repeatable descriptor. More than
/// one is a schema violation in the input; none is an error only for
/// required fields.
fn single_child<'e, T: ConfigNode>(
    el: &'e Element,
    field: &FieldDescriptor<T>,
) -> Result<Option<&'e Element>, DecodeError> {
    let mut matches = el.children_named(field.name);
    let first = matches.next();
    if matches.next().is_some() {
        return Err(DecodeError::DuplicateElement {
            parent: el.name.clone(),
            element: field.name,
        });
    }
    if first.is_none() && field.presence == Presence::Required {
        return Err(DecodeError::MissingElement {
            parent: el.name.clone(),
            element: field.name,
        });
    }
    Ok(first)
}

fn parse_scalar(
    element: &str,
    name: &'static str,
    format: Format,
    raw: &str,
) -> Result<ParsedValue, DecodeError> {
    match format {
        Format::Literal => Ok(ParsedValue::Text(raw.to_owned())),
        Format::Plain => {
            if raw.starts_with('-') {
                raw.parse::<i64>().map(ParsedValue::Int).map_err(|_| {
                    value_error(element, name, raw, "decimal integer")
                })
            } else {
                raw.parse::<u64>().map(ParsedValue::Uint).map_err(|_| {
                    value_error(element, name, raw, "decimal integer")
                })
            }
        }
        Format::Hex => {
            let digits = raw
                .strip_prefix("0x")
                .or_else(|| raw.strip_prefix("0X"))
                .ok_or_else(|| {
                    value_error(element, name, raw, "0x-prefixed hexadecimal integer")
                })?;
            u64::from_str_radix(digits, 16)
                .map(ParsedValue::Uint)
                .map_err(|_| value_error(element, name, raw, "0x-prefixed hexadecimal integer"))
        }
    }
}

fn decode_group<T: ConfigNode>(
    el: &Element,
    field: &FieldDescriptor<T>,
    group: &GroupSpec<T>,
    value: &mut T,
) -> Result<(), DecodeError> {
    match group.discriminator {
        Some(attr) => {
            let Some(child) = single_child(el, field)? else {
                return Ok(());
            };
            let Some(tag) = child.attr(attr) else {
                return Err(DecodeError::MissingAttribute {
                    element: child.name.clone(),
                    attribute: attr,
                });
            };
            match group.members.iter().find(|m| m.tag == tag) {
                Some(member) => (member.decode)(value, child),
                None => {
                    trace!(
                        "<{}>: leaving '{}' unset, no variant matches {}=\"{}\"",
                        el.name, field.name, attr, tag
                    );
                    Ok(())
                }
            }
        }
        None => {
            // Probe in descriptor order, not document order.
            for member in group.members {
                let mut matches = el.children_named(member.tag);
                let Some(child) = matches.next() else {
                    continue;
                };
                if matches.next().is_some() {
                    return Err(DecodeError::DuplicateElement {
                        parent: el.name.clone(),
                        element: member.tag,
                    });
                }
                return (member.decode)(value, child);
            }
            if field.presence == Presence::Required {
                return Err(DecodeError::MissingElement {
                    parent: el.name.clone(),
                    element: field.name,
                });
            }
            Ok(())
        }
    }
}

fn invalid(element: &str, name: &'static str, raw: &str, e: ValueError) -> DecodeError {
    value_error(element, name, raw, e.expected)
}

fn value_error(element: &str, name: &'static str, raw: &str, expected: &'static str) -> DecodeError {
    DecodeError::InvalidValue {
        element: element.to_owned(),
        name,
        value: raw.to_owned(),
        expected,
    }
}

fn log_unknown<T: ConfigNode>(el: &Element, fields: &[FieldDescriptor<T>]) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    for (name, _) in &el.attributes {
        let known = fields
            .iter()
            .any(|f| matches!(f.access, Access::Attribute(_)) && f.name == name.as_str());
        if !known {
            trace!("<{}>: ignoring unknown attribute '{}'", el.name, name);
        }
    }
    for child in &el.children {
        let known = fields.iter().any(|f| match &f.access {
            Access::ChildText(_) | Access::Child(_) | Access::Repeated(_) => f.name == child.name,
            Access::Group(group) => match group.discriminator {
                Some(_) => f.name == child.name,
                None => group.members.iter().any(|m| m.tag == child.name),
            },
            _ => false,
        });
        if !known {
            trace!("<{}>: ignoring unknown element <{}>", el.name, child.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{GroupMember, Value};
    use crate::markup;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        fast: Option<String>,
        slow: Option<String>,
    }

    impl ConfigNode for Probe {
        const NAME: &'static str = "Probe";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<Probe>] = &[FieldDescriptor::group(
                "transport",
                Presence::Optional,
                GroupSpec {
                    discriminator: None,
                    members: &[
                        GroupMember {
                            tag: "fast",
                            present: |o: &Probe| o.fast.is_some(),
                            encode: |_, _| Ok(()),
                            decode: |o: &mut Probe, el| {
                                o.fast = Some(el.attr("id").unwrap_or("").to_owned());
                                Ok(())
                            },
                            check: None,
                        },
                        GroupMember {
                            tag: "slow",
                            present: |o: &Probe| o.slow.is_some(),
                            encode: |_, _| Ok(()),
                            decode: |o: &mut Probe, el| {
                                o.slow = Some(el.attr("id").unwrap_or("").to_owned());
                                Ok(())
                            },
                            check: None,
                        },
                    ],
                },
            )];
            FIELDS
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Card {
        slot: u64,
        model: Option<String>,
        rate: Option<i64>,
    }

    impl ConfigNode for Card {
        const NAME: &'static str = "Card";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<Card>] = &[
                FieldDescriptor::attr(
                    "slot",
                    Presence::Required,
                    Format::Hex,
                    |o: &Card| Some(Value::Uint(o.slot)),
                    |o, v| {
                        o.slot = v.uint()?;
                        Ok(())
                    },
                ),
                FieldDescriptor::child_text(
                    "model",
                    Presence::Optional,
                    Format::Literal,
                    |o: &Card| o.model.as_deref().map(Value::Str),
                    |o, v| {
                        o.model = Some(v.text()?);
                        Ok(())
                    },
                ),
                FieldDescriptor::child_text(
                    "rate",
                    Presence::Optional,
                    Format::Plain,
                    |o: &Card| o.rate.map(Value::Int),
                    |o, v| {
                        o.rate = Some(v.int()?);
                        Ok(())
                    },
                ),
            ];
            FIELDS
        }
    }

    fn decode_card(text: &str) -> Result<Card, DecodeError> {
        from_element(&markup::parse(text).unwrap())
    }

    #[test]
    fn missing_required_attribute_is_reported_by_name() {
        let err = decode_card("<card/>").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingAttribute {
                attribute: "slot",
                ..
            }
        ));
    }

    #[test]
    fn hex_requires_the_prefix() {
        let err = decode_card(r#"<card slot="3"/>"#).unwrap_err();
        match err {
            DecodeError::InvalidValue { name, expected, .. } => {
                assert_eq!(name, "slot");
                assert!(expected.contains("0x-prefixed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_accepts_signed_values() {
        let card = decode_card(r#"<card slot="0x0"><rate>-1</rate></card>"#).unwrap();
        assert_eq!(card.rate, Some(-1));
    }

    #[test]
    fn bad_decimal_names_the_field() {
        let err = decode_card(r#"<card slot="0x0"><rate>fast</rate></card>"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidValue { name: "rate", .. }
        ));
    }

    #[test]
    fn duplicate_non_repeatable_element_is_rejected() {
        let err = decode_card(r#"<card slot="0x0"><model>a</model><model>b</model></card>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DuplicateElement {
                element: "model",
                ..
            }
        ));
    }

    #[test]
    fn unknown_attributes_and_elements_are_ignored() {
        let card =
            decode_card(r#"<card slot="0xa" vendor="acme"><model>x</model><extra/></card>"#)
                .unwrap();
        assert_eq!(card.slot, 10);
        assert_eq!(card.model.as_deref(), Some("x"));
    }

    #[test]
    fn empty_child_text_element_decodes_as_present_and_empty() {
        let card = decode_card(r#"<card slot="0x0"><model></model></card>"#).unwrap();
        assert_eq!(card.model.as_deref(), Some(""));
    }

    #[test]
    fn absent_optional_fields_stay_unset() {
        let card = decode_card(r#"<card slot="0x0"/>"#).unwrap();
        assert_eq!(card.model, None);
        assert_eq!(card.rate, None);
    }

    #[test]
    fn undiscriminated_group_probes_in_descriptor_order() {
        // Document order says slow first; descriptor order says fast wins.
        let el = markup::parse(r#"<probe><slow id="s"/><fast id="f"/></probe>"#).unwrap();
        let probe: Probe = from_element(&el).unwrap();
        assert_eq!(probe.fast.as_deref(), Some("f"));
        assert_eq!(probe.slow, None);
    }

    #[test]
    fn group_with_no_matching_member_stays_unset() {
        let el = markup::parse("<probe><other/></probe>").unwrap();
        let probe: Probe = from_element(&el).unwrap();
        assert_eq!(probe, Probe::default());
    }
}
