//! Property normalization.
//!
//! Top-level props always carry every field, with sentinels for the gaps.
//! Nested props (array elements, shape fields) only carry what the raw input
//! had, so the rendered docs don't repeat placeholder noise for every field of
//! every shape.

use super::jsdoc;
use super::types::{descriptor_name, normalize_type};
use super::{NO_DEFAULT, NO_DESCRIPTION, NO_NAME, UNKNOWN_TYPE};
use crate::model::{CanonicalProperty, CanonicalType, ObjectProperty, RawPropertyMeta, RawTypeDescriptor};
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    TopLevel,
    Nested,
}

/// Normalize one property record.
pub fn normalize_property(raw: &RawPropertyMeta, name: Option<&str>, mode: Mode) -> CanonicalProperty {
    let ty = resolve_type(raw);

    let annotations = is_function_form(raw)
        .then(|| raw.description())
        .flatten()
        .map(jsdoc::parse);

    let description = annotations
        .as_ref()
        .and_then(|doc| doc.description.clone())
        .or_else(|| raw.description().map(str::to_string));
    let default = raw
        .default_value
        .as_ref()
        .map(|d| d.value.replace('\n', ""));

    let mut prop = match mode {
        Mode::TopLevel => CanonicalProperty {
            name: Some(name.unwrap_or(NO_NAME).to_string()),
            required: Some(raw.required.unwrap_or(false)),
            ty,
            default: Some(default.unwrap_or_else(|| NO_DEFAULT.to_string())),
            description: Some(description.unwrap_or_else(|| NO_DESCRIPTION.to_string())),
            params: None,
            returns: None,
        },
        Mode::Nested => CanonicalProperty {
            name: name.map(str::to_string),
            required: raw.required,
            ty,
            default,
            description,
            params: None,
            returns: None,
        },
    };

    if let Some(doc) = annotations {
        if !doc.params.is_empty() {
            prop.params = Some(doc.params);
        }
        prop.returns = doc.returns;
    }

    if let (Some(signature), Some(description)) = (prop.ty.func_signature(), prop.description.as_mut()) {
        description.push_str(&format!("\n*signature:*`{signature}`"));
    }

    prop
}

/// `{name: "array", value}` for an array-of-element descriptor.
pub(crate) fn array_of(element: &RawPropertyMeta) -> CanonicalType {
    CanonicalType::Array(Box::new(normalize_property(element, None, Mode::Nested)))
}

/// Shape from an explicit field map (`{name: "shape", value: {...}}`).
pub(crate) fn shape_from_fields(fields: &IndexMap<String, RawPropertyMeta>) -> CanonicalType {
    CanonicalType::Shape(
        fields
            .iter()
            .map(|(key, meta)| shape_field(key, meta))
            .collect(),
    )
}

/// Shape from an object signature's property list.
pub(crate) fn shape_from_signature(properties: &[ObjectProperty]) -> CanonicalType {
    CanonicalType::Shape(
        properties
            .iter()
            .map(|prop| shape_field(&prop.key, &prop.value))
            .collect(),
    )
}

fn shape_field(key: &str, meta: &RawPropertyMeta) -> CanonicalProperty {
    normalize_property(meta, Some(key), Mode::Nested)
}

/// The prop-types descriptor contributes its name, except for the array and
/// shape forms which are expanded. Otherwise the TypeScript descriptor is
/// normalized in full.
fn resolve_type(raw: &RawPropertyMeta) -> CanonicalType {
    if let Some(prop_type) = raw.prop_types_descriptor() {
        match prop_type {
            RawTypeDescriptor::ArrayOf(element) => return array_of(element),
            RawTypeDescriptor::ShapeOf(fields) => return shape_from_fields(fields),
            other => {
                if let Some(name) = descriptor_name(other) {
                    return CanonicalType::label(name);
                }
            }
        }
    }
    raw.typescript_descriptor()
        .map(normalize_type)
        .unwrap_or_else(|| CanonicalType::label(UNKNOWN_TYPE))
}

fn is_function_form(raw: &RawPropertyMeta) -> bool {
    match raw.prop_types_descriptor() {
        Some(RawTypeDescriptor::Named(name)) => name == "func",
        Some(_) => false,
        None => matches!(
            raw.typescript_descriptor(),
            Some(RawTypeDescriptor::FunctionSignature { .. })
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn top_level(name: &str, raw: Value) -> Value {
        let meta: RawPropertyMeta = serde_json::from_value(raw).unwrap();
        serde_json::to_value(normalize_property(&meta, Some(name), Mode::TopLevel)).unwrap()
    }

    fn nested(raw: Value) -> Value {
        let meta: RawPropertyMeta = serde_json::from_value(raw).unwrap();
        serde_json::to_value(normalize_property(&meta, None, Mode::Nested)).unwrap()
    }

    #[test]
    fn top_level_fills_sentinels() {
        assert_eq!(
            top_level("id", json!({"type": {"name": "string"}, "required": true})),
            json!({
                "name": "id",
                "required": true,
                "type": "string",
                "default": "none",
                "description": "FIX ME NO DESCRIPTION"
            })
        );
    }

    #[test]
    fn top_level_without_type() {
        let prop = top_level("style", json!({"description": "Layer style"}));
        assert_eq!(prop["type"], json!(UNKNOWN_TYPE));
        assert_eq!(prop["required"], json!(false));
    }

    #[test]
    fn prop_types_union_keeps_its_name() {
        let prop = top_level(
            "p",
            json!({"type": {"name": "union", "value": [{"name": "string"}, {"name": "number"}]}}),
        );
        assert_eq!(prop["type"], json!("union"));
    }

    #[test]
    fn prop_types_name_wins_over_typescript() {
        let prop = top_level(
            "onPress",
            json!({
                "type": {"name": "func"},
                "tsType": {"name": "signature", "type": "function", "raw": "() => void", "signature": {"arguments": []}},
                "description": "Called on press."
            }),
        );
        assert_eq!(prop["type"], json!("func"));
        assert_eq!(prop["description"], json!("Called on press."));
    }

    #[test]
    fn nameless_prop_types_falls_through_to_typescript() {
        let prop = top_level("p", json!({"type": {}, "tsType": {"name": "string"}}));
        assert_eq!(prop["type"], json!("string"));
    }

    #[test]
    fn typescript_union_is_normalized() {
        let prop = top_level("p", json!({"tsType": {"name": "union", "raw": "number[] | number"}}));
        assert_eq!(prop["type"], json!("number[] \\| number"));
    }

    #[test]
    fn typescript_object_fields_are_normalized_in_full() {
        let prop = top_level(
            "p",
            json!({"tsType": {
                "name": "signature",
                "type": "object",
                "raw": "{ mode: 'a' | 'b' }",
                "signature": {"properties": [
                    {"key": "mode", "value": {"name": "union", "raw": "'a' | 'b'", "required": true}}
                ]}
            }}),
        );
        assert_eq!(
            prop["type"],
            json!({"name": "shape", "value": [{"name": "mode", "required": true, "type": "'a' \\| 'b'"}]})
        );
    }

    #[test]
    fn missing_name_is_flagged() {
        let meta: RawPropertyMeta = serde_json::from_value(json!({"tsType": {"name": "number"}})).unwrap();
        let prop = normalize_property(&meta, None, Mode::TopLevel);
        assert_eq!(prop.name.as_deref(), Some(NO_NAME));
    }

    #[test]
    fn default_value_drops_newlines() {
        let prop = top_level(
            "center",
            json!({"tsType": {"name": "Array"}, "defaultValue": {"value": "[\n  0,\n  0\n]", "computed": false}}),
        );
        assert_eq!(prop["default"], json!("[  0,  0]"));
    }

    #[test]
    fn nested_omits_absent_fields() {
        assert_eq!(nested(json!({"type": {"name": "number"}})), json!({"type": "number"}));
    }

    #[test]
    fn nested_keeps_present_fields() {
        assert_eq!(
            nested(json!({
                "type": {"name": "number"},
                "required": false,
                "description": "meters",
                "defaultValue": {"value": "0"}
            })),
            json!({"required": false, "type": "number", "default": "0", "description": "meters"})
        );
    }

    #[test]
    fn array_of_wraps_nested_element() {
        let prop = top_level(
            "coordinates",
            json!({"type": {"name": "arrayOf", "value": {"name": "number"}}, "required": true}),
        );
        assert_eq!(prop["type"], json!({"name": "array", "value": {"type": "number"}}));
    }

    #[test]
    fn shape_fields_are_nested() {
        let prop = top_level(
            "padding",
            json!({"type": {"name": "shape", "value": {
                "top": {"name": "number", "required": true},
                "left": {"name": "number", "description": "left inset"}
            }}}),
        );
        assert_eq!(
            prop["type"],
            json!({"name": "shape", "value": [
                {"name": "top", "required": true, "type": "number"},
                {"name": "left", "type": "number", "description": "left inset"}
            ]})
        );
    }

    #[test]
    fn both_shape_paths_converge() {
        let from_fields = top_level(
            "p",
            json!({"type": {"name": "shape", "value": {
                "x": {"name": "number", "required": true, "description": "X"},
                "y": {"name": "string"}
            }}}),
        );
        let from_signature = top_level(
            "p",
            json!({"tsType": {
                "name": "signature",
                "type": "object",
                "raw": "{ x: number; y?: string }",
                "signature": {"properties": [
                    {"key": "x", "value": {"name": "number", "required": true}, "description": "X"},
                    {"key": "y", "value": {"name": "string"}}
                ]}
            }}),
        );
        assert_eq!(from_fields["type"], from_signature["type"]);
    }

    #[test]
    fn func_description_is_parsed() {
        let prop = top_level(
            "onPress",
            json!({
                "type": {"name": "func"},
                "description": "Called on press.\n@param {object} event the press event\n@returns {void}"
            }),
        );
        assert_eq!(prop["description"], json!("Called on press."));
        assert_eq!(
            prop["params"],
            json!([{"name": "event", "description": "the press event", "type": {"name": "object"}, "optional": false}])
        );
        assert_eq!(prop["returns"], json!({"description": null, "type": {"name": "void"}}));
    }

    #[test]
    fn func_signature_is_appended_to_description() {
        let prop = top_level(
            "onPress",
            json!({
                "tsType": {
                    "name": "signature",
                    "type": "function",
                    "raw": "(event: PressEvent) => void",
                    "signature": {
                        "arguments": [{"name": "event", "type": {"name": "PressEvent"}}],
                        "return": {"name": "void"}
                    }
                },
                "description": "Called on press."
            }),
        );
        assert_eq!(
            prop["description"],
            json!("Called on press.\n*signature:*`(event:PressEvent) => void`")
        );
        assert_eq!(
            prop["type"],
            json!({"name": "func", "funcSignature": "(event:PressEvent) => void"})
        );
    }

    #[test]
    fn nested_func_without_description_stays_bare() {
        let value = nested(json!({
            "tsType": {
                "name": "signature",
                "type": "function",
                "raw": "() => void",
                "signature": {"arguments": []}
            }
        }));
        assert!(value.get("description").is_none());
        assert_eq!(value["type"], json!({"name": "func", "funcSignature": "() => void"}));
    }
}
