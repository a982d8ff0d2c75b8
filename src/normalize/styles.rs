//! Style catalog lookup.
//!
//! The catalog lists style families by their style-spec name (`fill`,
//! `fill-extrusion`, `light`, ...). Units are named after components
//! (`FillLayer`, `FillExtrusionLayer`, `Light`), so the catalog is keyed by
//! the PascalCased family name, with `Layer` appended for everything except
//! the singleton global families.

use crate::error::{GenerateError, Result};
use crate::model::{EnumValue, StyleAttribute};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Families that are not layers and keep their bare name.
pub const SINGLETON_FAMILIES: &[&str] = &["Light", "Atmosphere", "Terrain"];
const LAYER_SUFFIX: &str = "Layer";

/// One style family as it appears in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleFamily {
    pub name: String,
    pub properties: Option<Vec<StyleProperty>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Element type of array attributes.
    pub value: Option<String>,
    #[serde(default)]
    pub doc: StyleDoc,
    #[serde(default)]
    pub allowed_function_types: Vec<String>,
    pub expression: Option<Value>,
    pub transition: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDoc {
    pub description: Option<String>,
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    pub units: Option<String>,
    pub default: Option<Value>,
    pub requires: Option<Value>,
    pub disabled_by: Option<Value>,
    pub values: Option<IndexMap<String, EnumDoc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumDoc {
    #[serde(default)]
    pub doc: String,
}

/// Read-only index from unit name to style family.
#[derive(Debug, Default)]
pub struct StyleCatalog {
    families: HashMap<String, StyleFamily>,
}

impl StyleCatalog {
    pub fn new(families: Vec<StyleFamily>) -> Self {
        let families = families
            .into_iter()
            .map(|family| (unit_name(&family.name), family))
            .collect();
        StyleCatalog { families }
    }

    /// Load the catalog from a JSON array of families. An absent file is an
    /// empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "style catalog not found; styles will be omitted");
            return Ok(StyleCatalog::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
        let families: Vec<StyleFamily> = serde_json::from_str(&text)
            .map_err(|e| GenerateError::malformed(format!("style catalog {}", path.display()), e))?;
        Ok(StyleCatalog::new(families))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Style attributes for a unit, if its family is in the catalog and
    /// declares properties.
    pub fn styles_for(&self, unit: &str) -> Option<Vec<StyleAttribute>> {
        let properties = self.families.get(unit)?.properties.as_ref()?;
        Some(properties.iter().map(style_attribute).collect())
    }
}

fn style_attribute(prop: &StyleProperty) -> StyleAttribute {
    let mut ty = prop.ty.clone();
    let mut values = Vec::new();

    match prop.ty.as_str() {
        "enum" => {
            if let Some(docs) = &prop.doc.values {
                values = docs
                    .iter()
                    .map(|(value, doc)| EnumValue {
                        value: value.clone(),
                        doc: doc.doc.clone(),
                    })
                    .collect();
            }
        }
        "array" => {
            if let Some(element) = &prop.value {
                ty = format!("{ty}<{element}>");
            }
        }
        _ => {}
    }

    StyleAttribute {
        name: prop.name.clone(),
        ty,
        values,
        minimum: prop.doc.minimum.clone(),
        maximum: prop.doc.maximum.clone(),
        units: prop.doc.units.clone(),
        default: prop.doc.default.clone(),
        description: prop.doc.description.clone(),
        requires: prop.doc.requires.clone(),
        disabled_by: prop.doc.disabled_by.clone(),
        allowed_function_types: prop.allowed_function_types.clone(),
        expression: prop.expression.clone(),
        transition: prop.transition,
    }
}

/// `fill-extrusion` → `FillExtrusionLayer`, `light` → `Light`
pub fn unit_name(family: &str) -> String {
    let pascal = pascal_case(family);
    if SINGLETON_FAMILIES.contains(&pascal.as_str()) {
        pascal
    } else {
        pascal + LAYER_SUFFIX
    }
}

fn pascal_case(name: &str) -> String {
    name.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
