//! Output sinks for fuzzy label matching results.
//!
//! Sinks receive a finished [`fuzzmatch_model::ResultSet`]; a failed write
//! never invalidates it.

pub mod error;
pub mod format;
pub mod sink;

pub use error::{OutputError, Result};
pub use format::format_score;
pub use sink::{CsvSink, JsonSink, OutputFormat, OutputSink, write_csv, write_json};
