//! docjson: normalized API documentation for a component library.
//!
//! Collects raw metadata for every component (through an external extractor)
//! and every module (through the module documentation tool), normalizes
//! props, methods and style attributes into one schema, and writes the result
//! as a single JSON file keyed by unit name.

pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;

use builder::DocBuilder;
use config::GeneratorConfig;
use error::{GenerateError, Result};
use extract::{CommandExtractor, CommandTemplate, DocumentationTool};
use normalize::StyleCatalog;

/// Run a full generation with the external tools named in `config`.
/// Returns the number of documented units.
pub async fn run(config: &GeneratorConfig) -> Result<usize> {
    let extractor = template(&config.extractor, "extractor")?;
    let module_tool = template(&config.module_tool, "module tool")?;
    let styles = StyleCatalog::load(&config.style_catalog)?;
    tracing::debug!(families = styles.len(), "loaded style catalog");

    let builder = DocBuilder::new(
        config,
        CommandExtractor::new(extractor),
        DocumentationTool::new(module_tool),
        styles,
    );
    builder.generate(&config.output).await
}

fn template(command: &str, what: &str) -> Result<CommandTemplate> {
    CommandTemplate::parse(command).ok_or_else(|| {
        GenerateError::Config(format!("{what} command is empty or has an unclosed quote"))
    })
}
