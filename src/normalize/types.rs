//! Type descriptor normalization.
//!
//! Every [`RawTypeDescriptor`] variant resolves to a [`CanonicalType`]: a
//! label, an array, a shape, or a function signature. Unrecognised input
//! resolves to the [`UNKNOWN_TYPE`] label.

use super::props;
use super::{BIG_OBJECT, UNKNOWN_TYPE};
use crate::model::{CanonicalType, FunctionSignature, RawTypeDescriptor};

/// Inline object types at or above this length are flagged, not inlined.
pub const BIG_OBJECT_THRESHOLD: usize = 200;

/// Normalize one raw type descriptor.
pub fn normalize_type(descriptor: &RawTypeDescriptor) -> CanonicalType {
    match descriptor {
        RawTypeDescriptor::Named(name) => CanonicalType::label(name.as_str()),
        RawTypeDescriptor::ObjectSignature {
            properties: Some(properties),
            ..
        } => props::shape_from_signature(properties),
        RawTypeDescriptor::ObjectSignature {
            raw: Some(raw),
            properties: None,
        } => CanonicalType::Label(inline_object(raw)),
        RawTypeDescriptor::ObjectSignature {
            raw: None,
            properties: None,
        } => CanonicalType::label(UNKNOWN_TYPE),
        RawTypeDescriptor::FunctionSignature { signature, .. } => CanonicalType::Func {
            signature: dump_function(signature),
        },
        RawTypeDescriptor::ArrayOf(element) => props::array_of(element),
        RawTypeDescriptor::ShapeOf(fields) => props::shape_from_fields(fields),
        RawTypeDescriptor::Union { raw, elements } => CanonicalType::Label(
            union_label(raw.as_deref(), elements.as_deref())
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        ),
        RawTypeDescriptor::Unknown => CanonicalType::label(UNKNOWN_TYPE),
    }
}

/// Render an object type's raw text as a one-line label, or flag it when it
/// is too large to be readable.
fn inline_object(raw: &str) -> String {
    if raw.chars().count() < BIG_OBJECT_THRESHOLD {
        clean_raw(raw)
    } else {
        BIG_OBJECT.to_string()
    }
}

/// Strip all whitespace and escape pipes for table cells.
pub(crate) fn clean_raw(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('|', "\\|")
}

/// Label for a union: its raw text when known, else its member names.
pub(crate) fn union_label(raw: Option<&str>, elements: Option<&[RawTypeDescriptor]>) -> Option<String> {
    if let Some(raw) = raw.filter(|r| !r.is_empty()) {
        return Some(raw.replace('|', "\\|"));
    }
    let joined = elements?
        .iter()
        .filter_map(descriptor_name)
        .collect::<Vec<_>>()
        .join(" \\| ");
    (!joined.is_empty()).then_some(joined)
}

/// The `name` field a descriptor was read from.
pub(crate) fn descriptor_name(descriptor: &RawTypeDescriptor) -> Option<&str> {
    match descriptor {
        RawTypeDescriptor::Named(name) => Some(name),
        RawTypeDescriptor::FunctionSignature { .. } | RawTypeDescriptor::ObjectSignature { .. } => {
            Some("signature")
        }
        RawTypeDescriptor::ArrayOf(_) => Some("arrayOf"),
        RawTypeDescriptor::ShapeOf(_) => Some("shape"),
        RawTypeDescriptor::Union { .. } => Some("union"),
        RawTypeDescriptor::Unknown => None,
    }
}

/// `(a:A, b:B) => R`
fn dump_function(signature: &FunctionSignature) -> String {
    let args = signature
        .arguments
        .iter()
        .map(|arg| format!("{}:{}", arg.name, dump(&arg.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = signature
        .returns
        .as_deref()
        .map(dump)
        .unwrap_or_else(|| "void".to_string());
    format!("({args}) => {returns}")
}

/// Textual form of a type nested inside a function signature.
fn dump(descriptor: &RawTypeDescriptor) -> String {
    match descriptor {
        RawTypeDescriptor::FunctionSignature { signature, .. } => dump_function(signature),
        RawTypeDescriptor::ObjectSignature {
            properties: Some(properties),
            ..
        } => {
            let fields = properties
                .iter()
                .map(|prop| {
                    let ty = prop
                        .value
                        .type_descriptor()
                        .map(dump)
                        .unwrap_or_else(|| "unknown".to_string());
                    format!("{}: {}", prop.key, ty)
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{fields}}}")
        }
        RawTypeDescriptor::ObjectSignature { raw, .. } => {
            raw.clone().unwrap_or_else(|| "object".to_string())
        }
        RawTypeDescriptor::Union { raw: Some(raw), .. } => raw.clone(),
        RawTypeDescriptor::Unknown => "unknown".to_string(),
        other => descriptor_name(other).unwrap_or("unknown").to_string(),
    }
}
