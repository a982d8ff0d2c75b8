//! Module extraction through the documentation tool, run once per build.

use super::{CommandTemplate, DocNode, ModuleExtractor};
use crate::error::{GenerateError, Result};
use std::path::Path;
use std::process::Stdio;

pub struct DocumentationTool {
    template: CommandTemplate,
}

impl DocumentationTool {
    pub fn new(template: CommandTemplate) -> Self {
        DocumentationTool { template }
    }
}

impl ModuleExtractor for DocumentationTool {
    async fn extract_modules(&self, dir: &Path) -> Result<Vec<DocNode>> {
        let dir_arg = dir.to_string_lossy();
        let vars = [("dir", dir_arg.as_ref())];
        let command_line = self.template.display_with(&vars);

        tracing::debug!(command = %command_line, "running module documentation tool");
        let output = self
            .template
            .command(&vars)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| GenerateError::io(dir, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(GenerateError::Subprocess {
                command: command_line,
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| GenerateError::malformed(format!("output of `{command_line}`"), e))
    }
}
