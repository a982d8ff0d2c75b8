//! Method processing: public-surface filtering, usage examples, and
//! display labels for parameter types.

use super::types::{clean_raw, descriptor_name, union_label};
use crate::model::{CanonicalMethod, DocReturn, MethodParam, RawMethod, RawTypeDescriptor, TypeName};

/// Framework-internal methods that never appear in the docs.
pub const IGNORED_METHODS: &[&str] = &["setNativeProps"];

const PRIVATE_PREFIX: char = '_';
const EXAMPLE_TAG: &str = "example";

pub fn is_private(name: &str) -> bool {
    name.is_empty() || name.starts_with(PRIVATE_PREFIX)
}

fn is_documented(name: &str) -> bool {
    !is_private(name) && !IGNORED_METHODS.contains(&name)
}

/// Keep the public methods and normalize them.
pub fn process_methods(methods: &[RawMethod]) -> Vec<CanonicalMethod> {
    methods
        .iter()
        .filter(|method| is_documented(&method.name))
        .map(process_method)
        .collect()
}

fn process_method(method: &RawMethod) -> CanonicalMethod {
    CanonicalMethod {
        name: method.name.clone(),
        description: method.description.clone(),
        docblock: method.docblock.clone(),
        modifiers: method.modifiers.clone(),
        params: method
            .params
            .iter()
            .map(|param| MethodParam {
                name: param.name.clone(),
                description: param.description.clone(),
                optional: param.optional,
                ty: TypeName {
                    name: param.ty.as_ref().and_then(type_label),
                },
            })
            .collect(),
        returns: method.returns.as_ref().map(|returns| DocReturn {
            description: returns.description.clone(),
            ty: returns
                .ty
                .as_ref()
                .map(|ty| TypeName { name: type_label(ty) }),
        }),
        examples: method
            .docblock
            .as_deref()
            .map(extract_examples)
            .unwrap_or_default(),
    }
}

/// Every `@example` block of a docblock, with the tag itself removed.
pub fn extract_examples(docblock: &str) -> Vec<String> {
    docblock
        .split('@')
        .filter_map(|block| block.strip_prefix(EXAMPLE_TAG))
        .map(str::to_string)
        .collect()
}

/// Display label for a parameter type. Unlike the prop normalizer, inline
/// object types are never too wide to show.
pub fn type_label(descriptor: &RawTypeDescriptor) -> Option<String> {
    match descriptor {
        RawTypeDescriptor::FunctionSignature { raw, .. }
        | RawTypeDescriptor::ObjectSignature { raw, .. } => raw.as_deref().map(clean_raw),
        RawTypeDescriptor::Union { raw, elements } => union_label(raw.as_deref(), elements.as_deref()),
        other => descriptor_name(other).map(str::to_string),
    }
}
