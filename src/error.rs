//! Errors that abort a documentation build.
//!
//! Gaps in the extracted metadata are never errors: they degrade to the
//! sentinel strings in [`crate::normalize`]. Only failures at the collaborator
//! boundary (extractor, module tool, disk) end up here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The component extractor failed on one source file.
    #[error("failed to extract {file}: {message}")]
    Extraction { file: String, message: String },

    /// The module documentation tool exited non-zero or wrote to stderr.
    #[error("`{command}` failed ({status}): {stderr}")]
    Subprocess {
        command: String,
        status: String,
        stderr: String,
    },

    /// A collaborator produced output that is not the expected JSON.
    #[error("malformed {what}: {source}")]
    Malformed {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(what: impl Into<String>, source: serde_json::Error) -> Self {
        GenerateError::Malformed {
            what: what.into(),
            source,
        }
    }
}
