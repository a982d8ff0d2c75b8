//! Canonical documentation records: the schema written to `docs.json`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A normalized type.
///
/// Serializes as a bare string for labels, or as an object tagged by `name`
/// for the structured forms.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalType {
    Label(String),
    Array(Box<CanonicalProperty>),
    Shape(Vec<CanonicalProperty>),
    Func { signature: String },
}

impl CanonicalType {
    pub fn label(name: impl Into<String>) -> Self {
        CanonicalType::Label(name.into())
    }

    pub fn func_signature(&self) -> Option<&str> {
        match self {
            CanonicalType::Func { signature } => Some(signature),
            _ => None,
        }
    }
}

impl Serialize for CanonicalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalType::Label(label) => serializer.serialize_str(label),
            CanonicalType::Array(element) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", "array")?;
                map.serialize_entry("value", element)?;
                map.end()
            }
            CanonicalType::Shape(fields) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", "shape")?;
                map.serialize_entry("value", fields)?;
                map.end()
            }
            CanonicalType::Func { signature } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", "func")?;
                map.serialize_entry("funcSignature", signature)?;
                map.end()
            }
        }
    }
}

/// A normalized property.
///
/// Top-level props fill every optional field with a fallback; nested props
/// (array elements, shape fields) leave absent fields out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "type")]
    pub ty: CanonicalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<DocParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<DocReturn>,
}

/// `{name: label}` wrapper used for parameter and return types.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName {
            name: Some(name.into()),
        }
    }
}

/// A `@param` annotation attached to a function prop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocParam {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
    pub optional: bool,
}

/// A `@returns` annotation, on function props and module methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocReturn {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodParam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(rename = "type")]
    pub ty: TypeName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalMethod {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docblock: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    pub params: Vec<MethodParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<DocReturn>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub value: String,
    pub doc: String,
}

/// One style attribute merged from the style catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub values: Vec<EnumValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_by: Option<Value>,
    pub allowed_function_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<bool>,
}

/// The documentation record for one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    pub name: String,
    pub file_name_with_ext: String,
    pub description: String,
    pub props: Vec<CanonicalProperty>,
    pub methods: Vec<CanonicalMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<StyleAttribute>>,
}
