//! JSDoc annotations embedded in function prop descriptions.
//!
//! Recognizes the free-text description, `@param {Type} name description`
//! (`[name]` and `[name=default]` mark a parameter optional, as does a
//! trailing `=` on the type) and `@returns {Type} description`. Any other tag
//! ends the preceding block and is otherwise ignored.

use crate::model::{DocParam, DocReturn, TypeName};
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*?[ \t]*@(\w+)").unwrap());

static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:\{([^}]*)\}\s*)?(\[[^\]]*\]|\S+)\s*(?:-\s+)?(.*)$").unwrap()
});

static RE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(?:\{([^}]*)\}\s*)?(.*)$").unwrap());

/// Parsed annotation block.
#[derive(Debug, Default, PartialEq)]
pub struct JsDoc {
    pub description: Option<String>,
    pub params: Vec<DocParam>,
    pub returns: Option<DocReturn>,
}

/// Parse a description that may carry JSDoc tags.
pub fn parse(text: &str) -> JsDoc {
    let mut doc = JsDoc::default();

    let tags: Vec<_> = RE_TAG.captures_iter(text).collect();
    let body_end = tags
        .first()
        .and_then(|caps| caps.get(0))
        .map_or(text.len(), |m| m.start());
    doc.description = non_empty(&text[..body_end]);

    for (i, caps) in tags.iter().enumerate() {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = tags
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let content = text[whole.end()..end].trim();

        match tag.as_str() {
            "param" | "arg" | "argument" => {
                if let Some(param) = parse_param(content) {
                    doc.params.push(param);
                }
            }
            "returns" | "return" => doc.returns = Some(parse_returns(content)),
            _ => {}
        }
    }

    doc
}

fn parse_param(content: &str) -> Option<DocParam> {
    let caps = RE_PARAM.captures(content)?;
    let raw_type = caps.get(1).map(|m| m.as_str().trim());
    let raw_name = caps.get(2)?.as_str();

    let mut optional = false;
    let name = match raw_name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
    {
        Some(inner) => {
            optional = true;
            inner.split('=').next().unwrap_or(inner).trim()
        }
        None => raw_name,
    };

    let ty = raw_type.map(|t| {
        if let Some(stripped) = t.strip_suffix('=') {
            optional = true;
            TypeName::new(stripped.trim())
        } else {
            TypeName::new(t)
        }
    });

    Some(DocParam {
        name: name.to_string(),
        description: caps.get(3).and_then(|m| non_empty(m.as_str())),
        ty,
        optional,
    })
}

fn parse_returns(content: &str) -> DocReturn {
    let caps = RE_RETURNS.captures(content);
    DocReturn {
        description: caps
            .as_ref()
            .and_then(|c| c.get(2))
            .and_then(|m| non_empty(m.as_str())),
        ty: caps
            .as_ref()
            .and_then(|c| c.get(1))
            .map(|m| TypeName::new(m.as_str().trim())),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_description() {
        let doc = parse("Called when the map is pressed.");
        assert_eq!(
            doc.description.as_deref(),
            Some("Called when the map is pressed.")
        );
        assert!(doc.params.is_empty());
        assert!(doc.returns.is_none());
    }

    #[test]
    fn param_with_type() {
        let doc = parse("Called on press.\n@param {string} id the id");
        assert_eq!(doc.description.as_deref(), Some("Called on press."));
        assert_eq!(doc.params.len(), 1);
        assert_eq!(doc.params[0].name, "id");
        assert_eq!(doc.params[0].ty, Some(TypeName::new("string")));
        assert_eq!(doc.params[0].description.as_deref(), Some("the id"));
        assert!(!doc.params[0].optional);
    }

    #[test]
    fn optional_params() {
        let doc = parse("@param {number} [zoom=10] zoom level\n@param {boolean=} animated");
        assert_eq!(doc.description, None);
        assert_eq!(doc.params[0].name, "zoom");
        assert!(doc.params[0].optional);
        assert_eq!(doc.params[1].name, "animated");
        assert_eq!(doc.params[1].ty, Some(TypeName::new("boolean")));
        assert!(doc.params[1].optional);
    }

    #[test]
    fn param_without_type() {
        let doc = parse("@param event - the press event");
        assert_eq!(doc.params[0].name, "event");
        assert_eq!(doc.params[0].ty, None);
        assert_eq!(doc.params[0].description.as_deref(), Some("the press event"));
    }

    #[test]
    fn returns_tag() {
        let doc = parse("Compute.\n@returns {Promise<void>} resolves when done");
        let returns = doc.returns.unwrap();
        assert_eq!(returns.ty, Some(TypeName::new("Promise<void>")));
        assert_eq!(returns.description.as_deref(), Some("resolves when done"));
    }

    #[test]
    fn unknown_tags_end_blocks() {
        let doc = parse("Text\n@param {string} a first\n@deprecated use b\n@return {number}");
        assert_eq!(doc.params.len(), 1);
        assert_eq!(doc.params[0].description.as_deref(), Some("first"));
        assert_eq!(doc.returns.unwrap().description, None);
    }
}
