//! Input providers for fuzzy label matching.
//!
//! A provider yields the left and right label lists plus an optional
//! annotation column aligned with the left list. [`CsvSource`] reads all
//! three from columns of a single CSV file.

pub mod csv_source;
pub mod error;
pub mod selector;

pub use csv_source::{
    CsvSource, CsvTable, InputProvider, LabelColumn, MatchInput, read_csv_headers, read_csv_table,
};
pub use error::{IngestError, Result};
pub use selector::{AnnotationSelector, ColumnSelector, ORIGINAL_VARIATION};
