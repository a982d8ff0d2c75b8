//! docjson: generate `docs/docs.json` from component and module sources.
//!
//! With no arguments, runs the default generation relative to the current
//! directory. Flags override individual inputs, outputs and tool commands.

use anyhow::{Context, Result};
use clap::Parser;
use docjson::config::GeneratorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docjson",
    about = "Generate normalized API documentation JSON for components and modules"
)]
struct Cli {
    /// Library root; default paths are resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Component source directory
    #[arg(long)]
    components: Option<PathBuf>,

    /// Module source directory
    #[arg(long)]
    modules: Option<PathBuf>,

    /// Style catalog JSON file
    #[arg(long)]
    styles: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Component extractor command; `{file}` is replaced by the file name.
    /// Quote words that contain spaces; the command is not run through a shell
    #[arg(long)]
    extractor: Option<String>,

    /// Module documentation command; `{dir}` is replaced by the module directory.
    /// Quote words that contain spaces; the command is not run through a shell
    #[arg(long)]
    module_tool: Option<String>,
}

impl Cli {
    fn into_config(self) -> GeneratorConfig {
        let mut config = GeneratorConfig::from_root(&self.root);
        if let Some(dir) = self.components {
            config.components_dir = dir;
        }
        if let Some(dir) = self.modules {
            config.modules_dir = dir;
        }
        if let Some(path) = self.styles {
            config.style_catalog = path;
        }
        if let Some(path) = self.output {
            config.output = path;
        }
        if let Some(cmd) = self.extractor {
            config.extractor = cmd;
        }
        if let Some(cmd) = self.module_tool {
            config.module_tool = cmd;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Cli::parse().into_config();
    let output = config.output.clone();
    docjson::run(&config)
        .await
        .with_context(|| format!("failed to generate {}", output.display()))?;

    Ok(())
}
