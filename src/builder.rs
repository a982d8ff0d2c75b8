//! Unit builder. Drives both extraction pipelines and merges the results.
//!
//! A build enumerates component sources, extracts and post-processes each one
//! in order, and concurrently asks the module tool for every module. Both
//! pipelines must succeed; the first error aborts the build before anything
//! is written.

use crate::config::GeneratorConfig;
use crate::error::{GenerateError, Result};
use crate::extract::{ComponentExtractor, DocNode, ModuleExtractor};
use crate::model::{RawComponent, UnitRecord};
use crate::normalize::{normalize_property, process_methods, Mode, StyleCatalog};
use regex::Regex;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Component files that are base classes, not documented units.
pub const IGNORED_FILES: &[&str] = &["AbstractLayer", "AbstractSource", "NativeBridgeComponent"];

/// Marks a platform-specific variant of a component (`MapView.web.tsx`).
const PLATFORM_VARIANT_MARKER: &str = ".web.";

const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "tsx"];
const DECLARATION_SUFFIX: &str = ".d.ts";

// `@component {Name}` style markers left in component descriptions
static RE_DOC_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n*@\w+ \{.*\}").unwrap());

/// Unit name → documentation record, sorted for deterministic output.
pub type UnitMap = BTreeMap<String, UnitRecord>;

pub struct DocBuilder<C, M> {
    components_dir: PathBuf,
    modules_dir: PathBuf,
    components: C,
    modules: M,
    styles: StyleCatalog,
}

impl<C: ComponentExtractor, M: ModuleExtractor> DocBuilder<C, M> {
    pub fn new(config: &GeneratorConfig, components: C, modules: M, styles: StyleCatalog) -> Self {
        DocBuilder {
            components_dir: config.components_dir.clone(),
            modules_dir: config.modules_dir.clone(),
            components,
            modules,
            styles,
        }
    }

    /// Run both pipelines and merge their units. Module units replace
    /// component units of the same name.
    pub async fn build(&self) -> Result<UnitMap> {
        let (mut units, modules) = tokio::try_join!(self.build_components(), self.build_modules())?;
        debug!(components = units.len(), modules = modules.len(), "merging units");
        units.extend(modules);
        Ok(units)
    }

    /// Build and write the documentation file. Returns the number of units.
    pub async fn generate(&self, output: &Path) -> Result<usize> {
        let units = self.build().await?;
        let json = serde_json::to_string_pretty(&units)
            .map_err(|e| GenerateError::malformed("documentation record", e))?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GenerateError::io(parent, e))?;
        }
        tokio::fs::write(output, json)
            .await
            .map_err(|e| GenerateError::io(output, e))?;

        info!(units = units.len(), output = %output.display(), "wrote documentation");
        Ok(units.len())
    }

    async fn build_components(&self) -> Result<UnitMap> {
        let dir = self.components_dir.clone();
        let files = tokio::task::spawn_blocking(move || discover_sources(&dir))
            .await
            .map_err(|e| GenerateError::io(&self.components_dir, io::Error::other(e)))??;
        debug!(files = files.len(), dir = %self.components_dir.display(), "enumerated component sources");

        let mut units = UnitMap::new();
        for path in files {
            units = self.add_component(units, &path).await?;
        }
        Ok(units)
    }

    /// Extract one source file into `units`, unless it is ignored.
    async fn add_component(&self, mut units: UnitMap, path: &Path) -> Result<UnitMap> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(units);
        };
        let name = unit_name(file_name);
        if is_ignored(&name, file_name) {
            debug!(file = file_name, "skipping ignored file");
            return Ok(units);
        }

        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GenerateError::io(path, e))?;
        let raw = self.components.extract(&source, file_name).await?;
        let record = postprocess(raw, &name, file_name, &self.styles);
        units.insert(name, record);
        Ok(units)
    }

    async fn build_modules(&self) -> Result<UnitMap> {
        let nodes = self.modules.extract_modules(&self.modules_dir).await?;
        Ok(nodes
            .iter()
            .map(module_record)
            .map(|record| (record.name.clone(), record))
            .collect())
    }
}

/// Normalize one extracted component into its documentation record.
pub fn postprocess(raw: RawComponent, name: &str, file_name: &str, styles: &StyleCatalog) -> UnitRecord {
    let record = UnitRecord {
        name: name.to_string(),
        file_name_with_ext: file_name.to_string(),
        description: RE_DOC_TAG.replace_all(&raw.description, "").into_owned(),
        props: raw
            .props
            .iter()
            .map(|(prop_name, meta)| normalize_property(meta, Some(prop_name.as_str()), Mode::TopLevel))
            .collect(),
        methods: process_methods(&raw.methods),
        styles: styles.styles_for(name),
    };
    info!(
        "Processed {} ({} props, {} methods)",
        record.name,
        record.props.len(),
        record.methods.len()
    );
    record
}

/// Documentation record for one module node.
pub fn module_record(node: &DocNode) -> UnitRecord {
    UnitRecord {
        name: lower_first(&node.name),
        file_name_with_ext: node.file_name(),
        description: node.text(),
        props: Vec::new(),
        methods: node.methods(),
        styles: Some(Vec::new()),
    }
}

/// All candidate component sources under `dir`, sorted.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GenerateError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        ));
    }
    let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file() && is_source_file(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if file_name.ends_with(DECLARATION_SUFFIX) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// `MapView.tsx` → `MapView`
fn unit_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

fn is_ignored(name: &str, file_name: &str) -> bool {
    IGNORED_FILES.contains(&name) || file_name.contains(PLATFORM_VARIANT_MARKER)
}

/// `OfflineManager` → `offlineManager`
fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
