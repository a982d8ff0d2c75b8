//! Component extraction through an external command.
//!
//! The source text goes to the command's stdin and `{file}` in its
//! arguments is replaced by the file name. Stdout must be JSON: one record,
//! or an array of records of which the first is used.

use super::{CommandTemplate, ComponentExtractor};
use crate::error::{GenerateError, Result};
use crate::model::RawComponent;
use serde::Deserialize;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

pub struct CommandExtractor {
    template: CommandTemplate,
}

impl CommandExtractor {
    pub fn new(template: CommandTemplate) -> Self {
        CommandExtractor { template }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtractorOutput {
    Many(Vec<RawComponent>),
    One(Box<RawComponent>),
}

impl ComponentExtractor for CommandExtractor {
    async fn extract(&self, source: &str, file_name: &str) -> Result<RawComponent> {
        let vars = [("file", file_name)];
        let command_line = self.template.display_with(&vars);
        let failed = |message: String| GenerateError::Extraction {
            file: file_name.to_string(),
            message,
        };

        let mut child = self
            .template
            .command(&vars)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(format!("could not run `{command_line}`: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| failed("extractor stdin unavailable".to_string()))?;
        let feed = async move {
            match stdin.write_all(source.as_bytes()).await {
                // the extractor may not read its input at all
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };
        let (_, output) = tokio::try_join!(feed, child.wait_with_output())
            .map_err(|e| failed(format!("`{command_line}`: {e}")))?;

        if !output.status.success() {
            return Err(failed(format!(
                "`{command_line}` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let parsed: ExtractorOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| GenerateError::malformed(format!("extractor output for {file_name}"), e))?;
        match parsed {
            ExtractorOutput::One(component) => Ok(*component),
            ExtractorOutput::Many(components) => components
                .into_iter()
                .next()
                .ok_or_else(|| failed("no component found".to_string())),
        }
    }
}
