// crates/virtxml-rs/src/encode.rs

//! Typed object → tree encoding.
//!
//! The encoder walks a descriptor table in declaration order and never
//! mutates its input. Absent optional fields contribute nothing; a missing
//! required field or a doubly-populated variant group is a caller
//! programming error, reported and never silently dropped.

use crate::descriptor::{Access, ConfigNode, FieldDescriptor, Format, GroupSpec, Presence, Value};
use crate::error::EncodeError;
use crate::tree::Element;

/// Encodes a typed object into a fresh element with the given tag.
pub fn to_element<T: ConfigNode>(name: &str, value: &T) -> Result<Element, EncodeError> {
    let mut el = Element::new(name);
    fill(&mut el, value)?;
    Ok(el)
}

/// Encodes a typed object's fields into an existing element. Variant group
/// members use this to contribute to the group's shared element.
pub fn fill<T: ConfigNode>(el: &mut Element, value: &T) -> Result<(), EncodeError> {
    for field in T::fields() {
        match &field.access {
            Access::Attribute(access) => {
                if let Some(text) = scalar_text(el, field, (access.get)(value))? {
                    el.push_attr(field.name, text);
                }
            }
            Access::ChildText(access) => {
                if let Some(text) = scalar_text(el, field, (access.get)(value))? {
                    el.children.push(Element::with_text(field.name, text));
                }
            }
            Access::Text(access) => {
                if let Some(text) = scalar_text(el, field, (access.get)(value))? {
                    el.text = Some(text);
                }
            }
            Access::Child(child) => match (child.encode)(value, field.name)? {
                Some(node) => el.children.push(node),
                None => require_present(el, field)?,
            },
            Access::Repeated(repeated) => {
                el.children.extend((repeated.encode)(value, field.name)?);
            }
            Access::Group(group) => encode_group(el, field, group, value)?,
        }
    }
    Ok(())
}

fn scalar_text<T: ConfigNode>(
    el: &Element,
    field: &FieldDescriptor<T>,
    value: Option<Value<'_>>,
) -> Result<Option<String>, EncodeError> {
    let value = match value {
        Some(v) => v,
        None => {
            require_present(el, field)?;
            return Ok(None);
        }
    };
    if field.presence == Presence::OmitIfZero && value.is_zero() {
        return Ok(None);
    }
    let text = match (field.format, value) {
        (Format::Hex, Value::Uint(v)) => format!("{:#x}", v),
        (Format::Hex, Value::Int(v)) => format!("{:#x}", v),
        (_, Value::Uint(v)) => v.to_string(),
        (_, Value::Int(v)) => v.to_string(),
        (_, Value::Str(s)) => s.to_owned(),
    };
    Ok(Some(text))
}

fn encode_group<T: ConfigNode>(
    el: &mut Element,
    field: &FieldDescriptor<T>,
    group: &GroupSpec<T>,
    value: &T,
) -> Result<(), EncodeError> {
    let mut active = None;
    for member in group.members {
        if (member.present)(value) {
            if active.is_some() {
                return Err(EncodeError::ConflictingVariants {
                    element: el.name.clone(),
                    group: field.name,
                });
            }
            active = Some(member);
        }
    }
    let Some(member) = active else {
        require_present(el, field)?;
        return Ok(());
    };

    let mut child = match group.discriminator {
        Some(attr) => {
            let mut c = Element::new(field.name);
            c.push_attr(attr, member.tag);
            c
        }
        None => Element::new(member.tag),
    };
    (member.encode)(value, &mut child)?;
    el.children.push(child);
    Ok(())
}

fn require_present<T: ConfigNode>(
    el: &Element,
    field: &FieldDescriptor<T>,
) -> Result<(), EncodeError> {
    if field.presence == Presence::Required {
        return Err(EncodeError::MissingField {
            element: el.name.clone(),
            field: field.name,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{GroupMember, RepeatedAccess};

    /// Address-like record with separately optional shapes, so the
    /// exclusivity check is actually reachable.
    #[derive(Default)]
    struct Slotted {
        pci_slot: Option<u64>,
        usb_port: Option<u64>,
    }

    impl ConfigNode for Slotted {
        const NAME: &'static str = "Slotted";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<Slotted>] = &[FieldDescriptor::group(
                "address",
                Presence::Optional,
                GroupSpec {
                    discriminator: Some("type"),
                    members: &[
                        GroupMember {
                            tag: "pci",
                            present: |o: &Slotted| o.pci_slot.is_some(),
                            encode: |o: &Slotted, el| {
                                if let Some(slot) = o.pci_slot {
                                    el.push_attr("slot", format!("{:#x}", slot));
                                }
                                Ok(())
                            },
                            decode: |o: &mut Slotted, _| {
                                o.pci_slot = Some(0);
                                Ok(())
                            },
                            check: None,
                        },
                        GroupMember {
                            tag: "usb",
                            present: |o: &Slotted| o.usb_port.is_some(),
                            encode: |o: &Slotted, el| {
                                if let Some(port) = o.usb_port {
                                    el.push_attr("port", port.to_string());
                                }
                                Ok(())
                            },
                            decode: |o: &mut Slotted, _| {
                                o.usb_port = Some(0);
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

    #[derive(Default)]
    struct HexAttrs {
        base: u64,
        heads: u64,
        label: Option<String>,
    }

    impl ConfigNode for HexAttrs {
        const NAME: &'static str = "HexAttrs";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<HexAttrs>] = &[
                FieldDescriptor::attr(
                    "base",
                    Presence::Required,
                    Format::Hex,
                    |o: &HexAttrs| Some(Value::Uint(o.base)),
                    |o, v| {
                        o.base = v.uint()?;
                        Ok(())
                    },
                ),
                FieldDescriptor::attr(
                    "heads",
                    Presence::OmitIfZero,
                    Format::Plain,
                    |o: &HexAttrs| Some(Value::Uint(o.heads)),
                    |o, v| {
                        o.heads = v.uint()?;
                        Ok(())
                    },
                ),
                FieldDescriptor::attr(
                    "label",
                    Presence::Required,
                    Format::Literal,
                    |o: &HexAttrs| o.label.as_deref().map(Value::Str),
                    |o, v| {
                        o.label = Some(v.text()?);
                        Ok(())
                    },
                ),
            ];
            FIELDS
        }
    }

    #[derive(Default)]
    struct Listy {
        entries: Vec<String>,
    }

    impl ConfigNode for Listy {
        const NAME: &'static str = "Listy";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<Listy>] = &[FieldDescriptor::repeated(
                "entry",
                RepeatedAccess {
                    encode: |o: &Listy, name| {
                        Ok(o.entries
                            .iter()
                            .map(|e| Element::with_text(name, e.clone()))
                            .collect())
                    },
                    decode: |o: &mut Listy, el| {
                        o.entries.push(el.text.clone().unwrap_or_default());
                        Ok(())
                    },
                    check: None,
                },
            )];
            FIELDS
        }
    }

    #[test]
    fn conflicting_variant_members_fail_fast() {
        let both = Slotted {
            pci_slot: Some(3),
            usb_port: Some(1),
        };
        let err = to_element("controller", &both).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::ConflictingVariants {
                group: "address",
                ..
            }
        ));
    }

    #[test]
    fn single_variant_member_encodes_with_discriminator_first() {
        let one = Slotted {
            pci_slot: Some(3),
            usb_port: None,
        };
        let el = to_element("controller", &one).unwrap();
        let address = el.child("address").unwrap();
        let keys: Vec<&str> = address.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["type", "slot"]);
        assert_eq!(address.attr("type"), Some("pci"));
        assert_eq!(address.attr("slot"), Some("0x3"));
    }

    #[test]
    fn empty_variant_group_contributes_nothing() {
        let el = to_element("controller", &Slotted::default()).unwrap();
        assert!(el.children.is_empty());
    }

    #[test]
    fn required_hex_zero_still_renders() {
        let value = HexAttrs {
            base: 0,
            heads: 0,
            label: Some("a".into()),
        };
        let el = to_element("model", &value).unwrap();
        assert_eq!(el.attr("base"), Some("0x0"));
        assert_eq!(el.attr("heads"), None);
    }

    #[test]
    fn hex_renders_minimal_lowercase_digits() {
        let value = HexAttrs {
            base: 10,
            heads: 2,
            label: Some("a".into()),
        };
        let el = to_element("model", &value).unwrap();
        assert_eq!(el.attr("base"), Some("0xa"));
        assert_eq!(el.attr("heads"), Some("2"));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let value = HexAttrs {
            base: 1,
            heads: 0,
            label: None,
        };
        let err = to_element("model", &value).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::MissingField {
                field: "label",
                ..
            }
        ));
    }

    #[test]
    fn repeated_children_keep_sequence_order() {
        let value = Listy {
            entries: vec!["a".into(), "b".into(), "c".into()],
        };
        let el = to_element("list", &value).unwrap();
        let texts: Vec<&str> = el
            .children
            .iter()
            .map(|c| c.text.as_deref().unwrap())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }
}
