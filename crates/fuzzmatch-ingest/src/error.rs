//! Error types for input loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised before any matching work starts.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", path.display())]
    MissingHeader { path: PathBuf },
    #[error("column '{selector}' not found (available: {})", available.join(", "))]
    UnknownColumn {
        selector: String,
        available: Vec<String>,
    },
    #[error("invalid column selector '{0}': use a header name or #N for the N-th column")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
