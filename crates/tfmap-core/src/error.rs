use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tfmap operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read settings at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No module list in {path} (expected \"modules\" or \"test-file-mapper.modules\")")]
    MissingModules { path: PathBuf },

    #[error("Project root not found from {start}")]
    ProjectNotFound { start: PathBuf },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
