//! Generation settings.
//!
//! Every path has a fixed default relative to the library root, so a bare
//! `docjson` run needs no configuration at all.

use std::path::{Path, PathBuf};

pub const COMPONENTS_DIR: &str = "javascript/components";
pub const MODULES_DIR: &str = "javascript/modules";
pub const STYLE_CATALOG: &str = "scripts/autogenHelpers/style-spec.json";
pub const OUTPUT_FILE: &str = "docs/docs.json";

/// Reads a component's source on stdin and prints its metadata as JSON.
pub const DEFAULT_EXTRACTOR: &str = "node scripts/autogenHelpers/docgen.js {file}";
pub const DEFAULT_MODULE_TOOL: &str = "npx documentation build {dir} -f json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub components_dir: PathBuf,
    pub modules_dir: PathBuf,
    pub style_catalog: PathBuf,
    pub output: PathBuf,
    pub extractor: String,
    pub module_tool: String,
}

impl GeneratorConfig {
    /// Defaults for a library checked out at `root`.
    pub fn from_root(root: &Path) -> Self {
        GeneratorConfig {
            components_dir: root.join(COMPONENTS_DIR),
            modules_dir: root.join(MODULES_DIR),
            style_catalog: root.join(STYLE_CATALOG),
            output: root.join(OUTPUT_FILE),
            extractor: DEFAULT_EXTRACTOR.to_string(),
            module_tool: DEFAULT_MODULE_TOOL.to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::from_root(Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_relative_to_root() {
        let config = GeneratorConfig::from_root(Path::new("/lib"));
        assert_eq!(config.components_dir, Path::new("/lib/javascript/components"));
        assert_eq!(config.modules_dir, Path::new("/lib/javascript/modules"));
        assert_eq!(config.output, Path::new("/lib/docs/docs.json"));
    }

    #[test]
    fn default_uses_current_directory() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output, Path::new("./docs/docs.json"));
        assert_eq!(config.module_tool, DEFAULT_MODULE_TOOL);
    }
}
