//! Error types for writing results.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised after the result set was computed.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json output failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
