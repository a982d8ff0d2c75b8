//! Raw metadata as emitted by the component extractor.
//!
//! Type descriptors arrive as loosely-shaped JSON objects (`{name}`,
//! `{name: "signature", type, raw, signature}`, `{name: "arrayOf", value}`,
//! ...). They are read through [`WireType`] and resolved into the closed
//! [`RawTypeDescriptor`] enum once, at deserialization time. Anything that
//! fits none of the known shapes becomes [`RawTypeDescriptor::Unknown`]
//! instead of failing the whole record.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One extracted type descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireType")]
pub enum RawTypeDescriptor {
    /// A plain named type: `string`, `number`, `func`, `Array`, ...
    Named(String),
    /// `{name: "signature", type: "function"}`
    FunctionSignature {
        raw: Option<String>,
        signature: FunctionSignature,
    },
    /// `{name: "signature", type: "object"}`
    ObjectSignature {
        raw: Option<String>,
        properties: Option<Vec<ObjectProperty>>,
    },
    /// `{name: "arrayOf", value}`; the element keeps its own requiredness
    /// and description.
    ArrayOf(Box<RawPropertyMeta>),
    /// `{name: "shape", value: {field: descriptor}}`
    ShapeOf(IndexMap<String, RawPropertyMeta>),
    /// `{name: "union", raw?, elements?}`
    Union {
        raw: Option<String>,
        elements: Option<Vec<RawTypeDescriptor>>,
    },
    Unknown,
}

impl RawTypeDescriptor {
    pub fn is_unknown(&self) -> bool {
        matches!(self, RawTypeDescriptor::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub arguments: Vec<FunctionArgument>,
    pub returns: Option<Box<RawTypeDescriptor>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgument {
    pub name: String,
    pub ty: RawTypeDescriptor,
}

/// One `{key, value}` entry of an object signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: RawPropertyMeta,
}

/// One property as extracted, either a top-level prop or a nested field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPropertyMeta {
    pub required: Option<bool>,
    /// prop-types descriptor
    #[serde(rename = "type")]
    pub prop_type: Option<RawTypeDescriptor>,
    /// TypeScript (or Flow) descriptor
    #[serde(alias = "flowType")]
    pub ts_type: Option<RawTypeDescriptor>,
    pub default_value: Option<RawDefault>,
    pub description: Option<String>,
}

impl RawPropertyMeta {
    /// The prop-types descriptor, if it names a type.
    pub fn prop_types_descriptor(&self) -> Option<&RawTypeDescriptor> {
        self.prop_type.as_ref().filter(|d| !d.is_unknown())
    }

    /// The TypeScript (or Flow) descriptor, if it names a type.
    pub fn typescript_descriptor(&self) -> Option<&RawTypeDescriptor> {
        self.ts_type.as_ref().filter(|d| !d.is_unknown())
    }

    /// The first descriptor that names a type; prop-types wins.
    pub fn type_descriptor(&self) -> Option<&RawTypeDescriptor> {
        self.prop_types_descriptor().or_else(|| self.typescript_descriptor())
    }

    /// Description, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDefault {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

/// One documented component as returned by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub props: IndexMap<String, RawPropertyMeta>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMethod {
    #[serde(default)]
    pub name: String,
    pub docblock: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub params: Vec<RawMethodParam>,
    pub returns: Option<RawMethodReturn>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMethodParam {
    #[serde(default)]
    pub name: String,
    pub optional: Option<bool>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<RawTypeDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMethodReturn {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<RawTypeDescriptor>,
}

// -- Wire format --------------------------------------------------------------

/// Every field any descriptor shape may carry.
#[derive(Debug, Default, Deserialize)]
struct WireType {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    raw: Option<String>,
    signature: Option<WireSignature>,
    value: Option<Value>,
    elements: Option<Vec<RawTypeDescriptor>>,
    required: Option<bool>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireSignature {
    arguments: Option<Vec<WireArgument>>,
    #[serde(rename = "return")]
    returns: Option<RawTypeDescriptor>,
    properties: Option<Vec<WireObjectProperty>>,
}

#[derive(Debug, Deserialize)]
struct WireArgument {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: Option<RawTypeDescriptor>,
}

#[derive(Debug, Deserialize)]
struct WireObjectProperty {
    key: Value,
    #[serde(default)]
    value: WireType,
    description: Option<String>,
}

impl WireType {
    /// Lift a descriptor that carries its own `required`/`description` into a
    /// property record (shape fields, array elements, object properties).
    fn into_property(mut self) -> RawPropertyMeta {
        let required = self.required.take();
        let description = self.description.take();
        RawPropertyMeta {
            required,
            prop_type: Some(RawTypeDescriptor::from(self)),
            ts_type: None,
            default_value: None,
            description,
        }
    }

    /// As [`Self::into_property`], for members of a TypeScript object type.
    fn into_typescript_property(self) -> RawPropertyMeta {
        let mut prop = self.into_property();
        prop.ts_type = prop.prop_type.take();
        prop
    }
}

impl From<WireType> for RawTypeDescriptor {
    fn from(wire: WireType) -> Self {
        let Some(name) = wire.name else {
            return RawTypeDescriptor::Unknown;
        };

        match name.as_str() {
            "signature" => match wire.kind.as_ref().and_then(Value::as_str) {
                Some("function") => match wire.signature {
                    Some(sig) => RawTypeDescriptor::FunctionSignature {
                        raw: wire.raw,
                        signature: FunctionSignature {
                            arguments: sig
                                .arguments
                                .unwrap_or_default()
                                .into_iter()
                                .map(|arg| FunctionArgument {
                                    name: arg.name,
                                    ty: arg.ty.unwrap_or(RawTypeDescriptor::Unknown),
                                })
                                .collect(),
                            returns: sig.returns.map(Box::new),
                        },
                    },
                    None => RawTypeDescriptor::Unknown,
                },
                Some("object") => RawTypeDescriptor::ObjectSignature {
                    raw: wire.raw,
                    properties: wire
                        .signature
                        .and_then(|sig| sig.properties)
                        .map(|props| props.into_iter().map(object_property).collect()),
                },
                _ => RawTypeDescriptor::Unknown,
            },
            "arrayOf" => match wire.value.and_then(|v| from_value::<WireType>(v)) {
                Some(element) => RawTypeDescriptor::ArrayOf(Box::new(element.into_property())),
                None => RawTypeDescriptor::Named(name),
            },
            "shape" | "exact" => {
                match wire
                    .value
                    .and_then(|v| from_value::<IndexMap<String, WireType>>(v))
                {
                    Some(fields) => RawTypeDescriptor::ShapeOf(
                        fields
                            .into_iter()
                            .map(|(key, field)| (key, field.into_property()))
                            .collect(),
                    ),
                    None => RawTypeDescriptor::Named(name),
                }
            }
            "union" => {
                // prop-types unions list their members under `value`
                let elements = wire.elements.or_else(|| {
                    wire.value
                        .and_then(|v| from_value::<Vec<RawTypeDescriptor>>(v))
                });
                RawTypeDescriptor::Union {
                    raw: wire.raw,
                    elements,
                }
            }
            _ => RawTypeDescriptor::Named(name),
        }
    }
}

fn object_property(prop: WireObjectProperty) -> ObjectProperty {
    let key = match prop.key {
        Value::String(s) => s,
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        other => other.to_string(),
    };
    let mut value = prop.value.into_typescript_property();
    // the entry's own description overrides the one on the value
    if prop.description.is_some() {
        value.description = prop.description;
    }
    ObjectProperty { key, value }
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

/// Accept strings, stringify scalars, and treat null as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
