//! Nodes emitted by the module documentation tool (`documentation build -f json`).
//!
//! Descriptions are markdown ASTs (`{type: "root", children: [...]}`) and
//! parameter types are doctrine type expressions (`NameExpression`,
//! `UnionType`, `OptionalType`, ...). Both are walked as plain JSON.

use crate::model::{CanonicalMethod, DocReturn, MethodParam, TypeName};
use crate::normalize::methods::is_private;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocNode {
    #[serde(default)]
    pub name: String,
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Value,
    pub context: Option<DocContext>,
    #[serde(default)]
    pub members: DocMembers,
    #[serde(default)]
    pub params: Vec<DocNodeParam>,
    #[serde(default)]
    pub examples: Vec<DocExample>,
    #[serde(default)]
    pub returns: Vec<DocNodeReturn>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocContext {
    #[serde(default)]
    pub file: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocMembers {
    #[serde(rename = "static", default)]
    pub statics: Vec<DocNode>,
    #[serde(default)]
    pub instance: Vec<DocNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocNodeParam {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Value,
    #[serde(rename = "type", default)]
    pub ty: Value,
    pub optional: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocExample {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocNodeReturn {
    #[serde(default)]
    pub description: Value,
    #[serde(rename = "type", default)]
    pub ty: Value,
}

impl DocNode {
    /// Plain text of the node's description.
    pub fn text(&self) -> String {
        markdown_text(&self.description).trim().to_string()
    }

    /// Base name of the file the node was documented in.
    pub fn file_name(&self) -> String {
        self.context
            .as_ref()
            .map(|ctx| ctx.file.rsplit('/').next().unwrap_or_default().to_string())
            .unwrap_or_default()
    }

    /// Public function members, instance members first.
    pub fn methods(&self) -> Vec<CanonicalMethod> {
        self.members
            .instance
            .iter()
            .chain(&self.members.statics)
            .filter(|member| member.kind.as_deref() == Some("function"))
            .filter(|member| !is_private(&member.name))
            .map(DocNode::as_method)
            .collect()
    }

    fn as_method(&self) -> CanonicalMethod {
        CanonicalMethod {
            name: self.name.clone(),
            description: Some(self.text()).filter(|text| !text.is_empty()),
            docblock: None,
            modifiers: Vec::new(),
            params: self
                .params
                .iter()
                .map(|param| MethodParam {
                    name: param.name.clone(),
                    description: Some(markdown_text(&param.description).trim().to_string())
                        .filter(|text| !text.is_empty()),
                    optional: Some(
                        param.optional.unwrap_or(false) || expression_kind(&param.ty) == Some("OptionalType"),
                    ),
                    ty: TypeName {
                        name: type_expression_label(&param.ty),
                    },
                })
                .collect(),
            returns: self.returns.first().map(|returns| DocReturn {
                description: Some(markdown_text(&returns.description).trim().to_string())
                    .filter(|text| !text.is_empty()),
                ty: Some(TypeName {
                    name: type_expression_label(&returns.ty),
                }),
            }),
            examples: self
                .examples
                .iter()
                .map(|example| example.description.clone())
                .collect(),
        }
    }
}

fn expression_kind(expr: &Value) -> Option<&str> {
    expr.get("type").and_then(Value::as_str)
}

/// Flatten a markdown AST to text. Block children of the root are separated
/// by blank lines.
fn markdown_text(node: &Value) -> String {
    let literal = || node.get("value").and_then(Value::as_str).unwrap_or_default();
    let children = || {
        node.get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    };

    match expression_kind(node) {
        Some("text") => literal().to_string(),
        Some("inlineCode") => format!("`{}`", literal()),
        Some("code") => format!("```\n{}\n```", literal()),
        Some("break") => "\n".to_string(),
        Some("root") => children()
            .iter()
            .map(markdown_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => children().iter().map(markdown_text).collect(),
    }
}

/// Display label for a doctrine type expression.
fn type_expression_label(expr: &Value) -> Option<String> {
    let name = || expr.get("name").and_then(Value::as_str).map(str::to_string);
    let elements = || {
        expr.get("elements")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(type_expression_label).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    match expression_kind(expr)? {
        "NameExpression" => name(),
        "OptionalType" | "NullableType" | "NonNullableType" | "RestType" => {
            type_expression_label(expr.get("expression")?)
        }
        "UnionType" => Some(elements().join(" \\| ")),
        "TypeApplication" => {
            let base = type_expression_label(expr.get("expression")?)?;
            let args = expr
                .get("applications")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(type_expression_label).collect::<Vec<_>>())
                .unwrap_or_default();
            Some(format!("{base}<{}>", args.join(", ")))
        }
        "ArrayType" => Some(format!("[{}]", elements().join(", "))),
        "RecordType" => Some("Object".to_string()),
        "FunctionType" => Some("Function".to_string()),
        "AllLiteral" => Some("any".to_string()),
        "NullLiteral" => Some("null".to_string()),
        "UndefinedLiteral" => Some("undefined".to_string()),
        "VoidLiteral" => Some("void".to_string()),
        "StringLiteralType" => expr
            .get("value")
            .and_then(Value::as_str)
            .map(|v| format!("\"{v}\"")),
        "NumericLiteralType" | "BooleanLiteralType" => expr.get("value").map(Value::to_string),
        _ => name(),
    }
}
