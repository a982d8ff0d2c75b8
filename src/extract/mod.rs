//! Extraction collaborators, the tools that turn source into raw metadata.
//!
//! The builder only depends on the two traits below. The default
//! implementations shell out to external tools; tests substitute in-memory
//! extractors.

pub mod command;
pub mod component;
pub mod jsdoc_tree;
pub mod module;

pub use command::CommandTemplate;
pub use component::CommandExtractor;
pub use jsdoc_tree::DocNode;
pub use module::DocumentationTool;

use crate::error::Result;
use crate::model::RawComponent;
use std::path::Path;

/// Produces the raw record of one component source file.
#[allow(async_fn_in_trait)]
pub trait ComponentExtractor {
    async fn extract(&self, source: &str, file_name: &str) -> Result<RawComponent>;
}

/// Produces documentation nodes for every module in a directory.
#[allow(async_fn_in_trait)]
pub trait ModuleExtractor {
    async fn extract_modules(&self, dir: &Path) -> Result<Vec<DocNode>>;
}
