//! Error types shared across the analyzer crates.

use std::path::PathBuf;

/// Top-level error type for Smart Generation QA operations.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gate configuration error: {message}")]
    GateConfig { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using [`QaError`].
pub type QaResult<T> = Result<T, QaError>;

impl QaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn gate_config(msg: impl Into<String>) -> Self {
        Self::GateConfig {
            message: msg.into(),
        }
    }
}
