// crates/virtxml-rs/src/descriptor.rs

//! Field descriptor tables.
//!
//! A configuration type describes its wire mapping as a static table of
//! [`FieldDescriptor`]s, one per field, in wire order: declaration order in
//! the table is exactly the attribute/child order of the produced document.
//! Accessors are plain fn pointers, so a table is a `const` the encoder and
//! decoder walk in lock-step with the typed object.
//!
//! Tables are static data and may be defective only through a programming
//! error; [`check_table`] and [`deep_check`] verify their invariants once
//! per process before first use.

use crate::error::{DecodeError, EncodeError, SchemaError};
use crate::tree::Element;

/// When a field appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always present; missing at encode or decode time is an error.
    Required,
    /// Present only when the field holds a value.
    Optional,
    /// Present unless the value is zero (or an empty string).
    ///
    /// Only this policy ever omits based on the value itself; a `Required`
    /// zero still renders (`0x0`, `0`).
    OmitIfZero,
}

/// How a scalar value renders on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Decimal integer; signed values accepted.
    Plain,
    /// `0x`-prefixed lowercase hexadecimal, minimal digits; decoding
    /// requires the prefix.
    Hex,
    /// The string as-is.
    Literal,
}

/// A scalar borrowed from a typed object during encoding.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Uint(u64),
    Int(i64),
    Str(&'a str),
}

impl Value<'_> {
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Uint(v) => *v == 0,
            Value::Int(v) => *v == 0,
            Value::Str(s) => s.is_empty(),
        }
    }
}

/// A scalar parsed from the wire, handed to a field setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Uint(u64),
    Int(i64),
    Text(String),
}

/// A setter rejected a parsed value (wrong kind or out of range for the
/// backing field). The engine reports it as an invalid-value decode error.
#[derive(Debug, Clone, Copy)]
pub struct ValueError {
    pub expected: &'static str,
}

impl ParsedValue {
    pub fn uint(self) -> Result<u64, ValueError> {
        match self {
            ParsedValue::Uint(v) => Ok(v),
            ParsedValue::Int(v) if v >= 0 => Ok(v as u64),
            _ => Err(ValueError {
                expected: "unsigned integer",
            }),
        }
    }

    pub fn int(self) -> Result<i64, ValueError> {
        match self {
            ParsedValue::Int(v) => Ok(v),
            ParsedValue::Uint(v) => i64::try_from(v).map_err(|_| ValueError {
                expected: "signed integer",
            }),
            ParsedValue::Text(_) => Err(ValueError {
                expected: "signed integer",
            }),
        }
    }

    pub fn text(self) -> Result<String, ValueError> {
        match self {
            ParsedValue::Text(s) => Ok(s),
            _ => Err(ValueError { expected: "string" }),
        }
    }
}

pub type GetFn<T> = for<'a> fn(&'a T) -> Option<Value<'a>>;
pub type SetFn<T> = fn(&mut T, ParsedValue) -> Result<(), ValueError>;

/// Validates a nested type's table; embedded so [`deep_check`] can recurse
/// through fn pointers without knowing the nested type.
pub type CheckFn = fn() -> Result<(), SchemaError>;

/// Get/set pair for a scalar-valued field.
pub struct ScalarAccess<T: 'static> {
    pub get: GetFn<T>,
    pub set: SetFn<T>,
}

/// Accessors for a nested sub-document field.
pub struct ChildAccess<T: 'static> {
    /// Encodes the field into a child element named by the descriptor,
    /// `None` when the field is absent.
    pub encode: fn(&T, &str) -> Result<Option<Element>, EncodeError>,
    /// Decodes a matching child element into the field.
    pub decode: fn(&mut T, &Element) -> Result<(), DecodeError>,
    pub check: Option<CheckFn>,
}

/// Accessors for an ordered sequence of same-named child elements.
/// Sequence order is wire order, exactly, both directions.
pub struct RepeatedAccess<T: 'static> {
    pub encode: fn(&T, &str) -> Result<Vec<Element>, EncodeError>,
    /// Appends one decoded child to the backing sequence.
    pub decode: fn(&mut T, &Element) -> Result<(), DecodeError>,
    pub check: Option<CheckFn>,
}

/// One shape of a variant group.
pub struct GroupMember<T: 'static> {
    /// Discriminator value (or element name for undiscriminated groups).
    pub tag: &'static str,
    pub present: fn(&T) -> bool,
    /// Fills the group's element with this member's attributes/children.
    pub encode: fn(&T, &mut Element) -> Result<(), EncodeError>,
    pub decode: fn(&mut T, &Element) -> Result<(), DecodeError>,
    pub check: Option<CheckFn>,
}

/// A set of mutually exclusive shapes for one logical field.
///
/// With a `discriminator`, all members share the group's element name and
/// the member tag is the discriminator attribute's value
/// (`<address type="pci" .../>`). Without one, the member tag is itself the
/// element name. At most one member may be populated at encode time.
pub struct GroupSpec<T: 'static> {
    pub discriminator: Option<&'static str>,
    pub members: &'static [GroupMember<T>],
}

/// Markup role of a field plus its typed accessors.
pub enum Access<T: 'static> {
    /// An attribute on the owning element.
    Attribute(ScalarAccess<T>),
    /// A child element holding only text (`<name>test</name>`).
    ChildText(ScalarAccess<T>),
    /// The owning element's own text content
    /// (`<memory unit="KiB">8192</memory>`).
    Text(ScalarAccess<T>),
    /// A nested sub-document.
    Child(ChildAccess<T>),
    /// An ordered sequence of same-named children.
    Repeated(RepeatedAccess<T>),
    /// A variant group.
    Group(GroupSpec<T>),
}

/// One field's wire mapping. `format` applies to scalar roles only.
pub struct FieldDescriptor<T: 'static> {
    pub name: &'static str,
    pub presence: Presence,
    pub format: Format,
    pub access: Access<T>,
}

impl<T> FieldDescriptor<T> {
    pub const fn attr(
        name: &'static str,
        presence: Presence,
        format: Format,
        get: GetFn<T>,
        set: SetFn<T>,
    ) -> Self {
        FieldDescriptor {
            name,
            presence,
            format,
            access: Access::Attribute(ScalarAccess { get, set }),
        }
    }

    pub const fn child_text(
        name: &'static str,
        presence: Presence,
        format: Format,
        get: GetFn<T>,
        set: SetFn<T>,
    ) -> Self {
        FieldDescriptor {
            name,
            presence,
            format,
            access: Access::ChildText(ScalarAccess { get, set }),
        }
    }

    pub const fn text(presence: Presence, format: Format, get: GetFn<T>, set: SetFn<T>) -> Self {
        FieldDescriptor {
            name: "",
            presence,
            format,
            access: Access::Text(ScalarAccess { get, set }),
        }
    }

    pub const fn child(name: &'static str, presence: Presence, access: ChildAccess<T>) -> Self {
        FieldDescriptor {
            name,
            presence,
            format: Format::Literal,
            access: Access::Child(access),
        }
    }

    pub const fn repeated(name: &'static str, access: RepeatedAccess<T>) -> Self {
        FieldDescriptor {
            name,
            presence: Presence::Optional,
            format: Format::Literal,
            access: Access::Repeated(access),
        }
    }

    pub const fn group(name: &'static str, presence: Presence, spec: GroupSpec<T>) -> Self {
        FieldDescriptor {
            name,
            presence,
            format: Format::Literal,
            access: Access::Group(spec),
        }
    }
}

/// A typed configuration object with a descriptor table.
///
/// `Default` is the zero value decoding starts from; optional fields must
/// distinguish "absent" from "present with zero value".
pub trait ConfigNode: Default + Sized + 'static {
    /// Type name for table diagnostics.
    const NAME: &'static str;

    /// The descriptor table, in wire order.
    fn fields() -> &'static [FieldDescriptor<Self>];
}

/// Checks one table's local invariants: unique attribute names, unique
/// child element names (variant member tags included for undiscriminated
/// groups), unique member tags per group, non-empty groups, at most one
/// text-content field.
pub fn check_table<T: ConfigNode>() -> Result<(), SchemaError> {
    let mut attrs: Vec<&'static str> = Vec::new();
    let mut children: Vec<&'static str> = Vec::new();
    let mut has_text = false;

    let mut claim_child = |name: &'static str| -> Result<(), SchemaError> {
        if children.contains(&name) {
            return Err(SchemaError::DuplicateChild {
                table: T::NAME,
                name,
            });
        }
        children.push(name);
        Ok(())
    };

    for field in T::fields() {
        match &field.access {
            Access::Attribute(_) => {
                if attrs.contains(&field.name) {
                    return Err(SchemaError::DuplicateAttribute {
                        table: T::NAME,
                        name: field.name,
                    });
                }
                attrs.push(field.name);
            }
            Access::Text(_) => {
                if has_text {
                    return Err(SchemaError::DuplicateText { table: T::NAME });
                }
                has_text = true;
            }
            Access::ChildText(_) | Access::Child(_) | Access::Repeated(_) => {
                claim_child(field.name)?;
            }
            Access::Group(group) => {
                if group.members.is_empty() {
                    return Err(SchemaError::EmptyGroup {
                        table: T::NAME,
                        group: field.name,
                    });
                }
                let mut tags: Vec<&'static str> = Vec::new();
                for member in group.members {
                    if tags.contains(&member.tag) {
                        return Err(SchemaError::DuplicateVariant {
                            table: T::NAME,
                            group: field.name,
                            tag: member.tag,
                        });
                    }
                    tags.push(member.tag);
                }
                match group.discriminator {
                    Some(_) => claim_child(field.name)?,
                    None => {
                        for member in group.members {
                            claim_child(member.tag)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Checks a table and every table reachable from it.
pub fn deep_check<T: ConfigNode>() -> Result<(), SchemaError> {
    check_table::<T>()?;
    for field in T::fields() {
        match &field.access {
            Access::Child(child) => {
                if let Some(check) = child.check {
                    check()?;
                }
            }
            Access::Repeated(repeated) => {
                if let Some(check) = repeated.check {
                    check()?;
                }
            }
            Access::Group(group) => {
                for member in group.members {
                    if let Some(check) = member.check {
                        check()?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct DupAttr {
        a: Option<String>,
        b: Option<String>,
    }

    impl ConfigNode for DupAttr {
        const NAME: &'static str = "DupAttr";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<DupAttr>] = &[
                FieldDescriptor::attr(
                    "mode",
                    Presence::Optional,
                    Format::Literal,
                    |o: &DupAttr| o.a.as_deref().map(Value::Str),
                    |o, v| {
                        o.a = Some(v.text()?);
                        Ok(())
                    },
                ),
                FieldDescriptor::attr(
                    "mode",
                    Presence::Optional,
                    Format::Literal,
                    |o: &DupAttr| o.b.as_deref().map(Value::Str),
                    |o, v| {
                        o.b = Some(v.text()?);
                        Ok(())
                    },
                ),
            ];
            FIELDS
        }
    }

    #[derive(Default)]
    struct DupTag {
        first: Option<u64>,
        second: Option<u64>,
    }

    impl ConfigNode for DupTag {
        const NAME: &'static str = "DupTag";
        fn fields() -> &'static [FieldDescriptor<Self>] {
            const FIELDS: &[FieldDescriptor<DupTag>] = &[FieldDescriptor::group(
                "address",
                Presence::Optional,
                GroupSpec {
                    discriminator: Some("type"),
                    members: &[
                        GroupMember {
                            tag: "pci",
                            present: |o: &DupTag| o.first.is_some(),
                            encode: |_, _| Ok(()),
                            decode: |_, _| Ok(()),
                            check: None,
                        },
                        GroupMember {
                            tag: "pci",
                            present: |o: &DupTag| o.second.is_some(),
                            encode: |_, _| Ok(()),
                            decode: |_, _| Ok(()),
                            check: None,
                        },
                    ],
                },
            )];
            FIELDS
        }
    }

    #[test]
    fn duplicate_attribute_names_are_rejected() {
        assert_eq!(
            check_table::<DupAttr>(),
            Err(SchemaError::DuplicateAttribute {
                table: "DupAttr",
                name: "mode",
            })
        );
    }

    #[test]
    fn duplicate_variant_tags_within_one_group_are_rejected() {
        assert_eq!(
            check_table::<DupTag>(),
            Err(SchemaError::DuplicateVariant {
                table: "DupTag",
                group: "address",
                tag: "pci",
            })
        );
    }

    #[test]
    fn parsed_value_conversions() {
        assert_eq!(ParsedValue::Uint(7).uint().unwrap(), 7);
        assert_eq!(ParsedValue::Int(-1).int().unwrap(), -1);
        assert_eq!(ParsedValue::Uint(9).int().unwrap(), 9);
        assert!(ParsedValue::Int(-1).uint().is_err());
        assert!(ParsedValue::Text("x".into()).uint().is_err());
        assert_eq!(ParsedValue::Text("pty".into()).text().unwrap(), "pty");
    }

    #[test]
    fn zero_detection_covers_all_kinds() {
        assert!(Value::Uint(0).is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(Value::Str("").is_zero());
        assert!(!Value::Uint(1).is_zero());
        assert!(!Value::Str("0").is_zero());
    }
}
