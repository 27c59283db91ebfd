//! Strict validation for DMAP element trees.
//!
//! Decoding only checks that a payload fits its tag's primitive kind. This
//! module adds the checks a producer would apply: every tag is known to a
//! given registry, values have the registered kind, and integer boxes are no
//! wider than the kind's nominal width.
//!
//! Lazy lists are materialized while walking the tree.

use crate::error::ValidationError;
use crate::model::{Element, Value};
use crate::registry::Registry;

/// Validates an element and all of its descendants against `registry`.
pub fn validate_element(element: &Element, registry: &Registry) -> Result<(), ValidationError> {
    let code = element.code();
    let tag = registry
        .get(code)
        .ok_or(ValidationError::UnknownTag { code })?;

    let kind = tag.kind();
    let value = element.value();
    if !kind.accepts(value) {
        return Err(ValidationError::KindMismatch {
            code,
            registered: kind,
            found: value.kind(),
        });
    }

    match value {
        Value::Integer(int) => {
            if let Some(max) = kind.integer_width() {
                if int.width() > max {
                    return Err(ValidationError::WidthExceedsKind {
                        code,
                        max: max as u8,
                        width: int.width() as u8,
                    });
                }
            }
        }
        Value::Container(container) => {
            for child in container.iter()? {
                validate_element(child, registry)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validates a sequence of sibling elements.
pub fn validate_elements<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    registry: &Registry,
) -> Result<(), ValidationError> {
    for element in elements {
        validate_element(element, registry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_bytes;
    use crate::error::DecodeError;
    use crate::model::builder::ElementBuilder;
    use crate::model::Kind;
    use crate::registry::{TagCase, TagCode};

    fn header(code: &[u8; 4], len: u32) -> Vec<u8> {
        let mut bytes = code.to_vec();
        bytes.extend_from_slice(&len.to_be_bytes());
        bytes
    }

    #[test]
    fn test_valid_tree() {
        let element = ElementBuilder::new("msrv")
            .number("mstt", 200)
            .list("mlcl", |b| b.text("minm", "x"))
            .build()
            .unwrap();
        assert!(validate_element(&element, &Registry::builtin()).is_ok());
    }

    #[test]
    fn test_wide_box_for_byte_kind() {
        // mikd is a Byte tag; a 4-byte box decodes but fails strict validation.
        let mut bytes = header(b"mikd", 4);
        bytes.extend_from_slice(&2u32.to_be_bytes());
        let element = decode_bytes(&bytes).unwrap();

        let result = validate_element(&element, &Registry::builtin());
        assert!(matches!(
            result,
            Err(ValidationError::WidthExceedsKind { max: 1, width: 4, .. })
        ));
    }

    #[test]
    fn test_tag_unknown_to_other_registry() {
        let element = ElementBuilder::new("msrv").text("minm", "x").build().unwrap();
        let mut registry = Registry::new(TagCase::Lower);
        registry.register("msrv", "dmap.serverinforesponse", Kind::List).unwrap();

        let result = validate_element(&element, &registry);
        assert!(matches!(
            result,
            Err(ValidationError::UnknownTag { code }) if code == TagCode::new(*b"minm")
        ));
    }

    #[test]
    fn test_kind_changed_in_registry() {
        let element = ElementBuilder::new("msrv").text("minm", "x").build().unwrap();
        let mut registry = Registry::builtin();
        registry.register("minm", "custom.number", Kind::Integer).unwrap();

        let result = validate_element(&element, &registry);
        assert!(matches!(
            result,
            Err(ValidationError::KindMismatch { registered: Kind::Integer, found: Kind::String, .. })
        ));
    }

    #[test]
    fn test_materialization_failure_is_reported() {
        let child = header(b"zzzz", 0);
        let mut bytes = header(b"mlcl", child.len() as u32);
        bytes.extend_from_slice(&child);
        let element = decode_bytes(&bytes).unwrap();

        let result = validate_element(&element, &Registry::builtin());
        assert!(matches!(
            result,
            Err(ValidationError::Decode(DecodeError::UnknownTag { .. }))
        ));
    }

    #[test]
    fn test_validate_siblings() {
        let a = ElementBuilder::new("mlit").number("miid", 1).build().unwrap();
        let b = ElementBuilder::new("mlit").number("miid", 2).build().unwrap();
        assert!(validate_elements([&a, &b], &Registry::builtin()).is_ok());
    }
}
