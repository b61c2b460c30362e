//! CSV input provider: both label lists come from columns of one table.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::selector::{AnnotationSelector, ColumnSelector, ORIGINAL_VARIATION, find_header};

/// One selected column: its header and its values in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelColumn {
    pub header: String,
    pub values: Vec<String>,
}

impl LabelColumn {
    pub fn new(header: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            header: header.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values that are empty after trimming.
    pub fn blank_count(&self) -> usize {
        self.values.iter().filter(|v| v.trim().is_empty()).count()
    }
}

/// Everything a matching run needs from its input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchInput {
    pub left: LabelColumn,
    pub right: LabelColumn,
    /// Pass-through column aligned with `left`.
    pub annotation: Option<LabelColumn>,
}

/// Source of the two label lists.
pub trait InputProvider {
    /// Loads both lists.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the source cannot be read or a
    /// requested column does not exist.
    fn load(&self) -> Result<MatchInput>;
}

/// Header row and data rows of a CSV file, cells normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Values of one column; short rows yield empty strings.
    pub fn column(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

/// Reads `left`, `right` and an optional annotation column from one CSV file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    left: ColumnSelector,
    right: ColumnSelector,
    annotation: AnnotationSelector,
    skip_missing: bool,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, left: ColumnSelector, right: ColumnSelector) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            left,
            right,
            annotation: AnnotationSelector::Auto,
            skip_missing: false,
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationSelector) -> Self {
        self.annotation = annotation;
        self
    }

    /// Drop blank values instead of keeping them as empty labels.
    #[must_use]
    pub fn with_skip_missing(mut self, skip_missing: bool) -> Self {
        self.skip_missing = skip_missing;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn annotation_index(&self, headers: &[String]) -> Result<Option<usize>> {
        match &self.annotation {
            AnnotationSelector::Auto => Ok(find_header(headers, ORIGINAL_VARIATION)),
            AnnotationSelector::Column(selector) => selector.resolve(headers).map(Some),
            AnnotationSelector::Disabled => Ok(None),
        }
    }
}

impl InputProvider for CsvSource {
    fn load(&self) -> Result<MatchInput> {
        let table = read_csv_table(&self.path, self.delimiter)?;
        let left_index = self.left.resolve(&table.headers)?;
        let right_index = self.right.resolve(&table.headers)?;
        let annotation_index = self.annotation_index(&table.headers)?;

        let mut left = LabelColumn::new(table.headers[left_index].clone(), table.column(left_index));
        let mut right =
            LabelColumn::new(table.headers[right_index].clone(), table.column(right_index));
        let mut annotation = annotation_index
            .map(|index| LabelColumn::new(table.headers[index].clone(), table.column(index)));

        if self.skip_missing {
            let keep: Vec<bool> = left.values.iter().map(|v| !v.is_empty()).collect();
            left.values = retain_flagged(left.values, &keep);
            if let Some(column) = annotation.as_mut() {
                column.values = retain_flagged(std::mem::take(&mut column.values), &keep);
            }
            right.values.retain(|v| !v.is_empty());
        }

        info!(
            path = %self.path.display(),
            left_column = %left.header,
            right_column = %right.header,
            annotation_column = annotation.as_ref().map(|c| c.header.as_str()),
            left = left.len(),
            right = right.len(),
            "loaded match input"
        );
        Ok(MatchInput {
            left,
            right,
            annotation,
        })
    }
}

fn retain_flagged(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(value, keep)| keep.then_some(value))
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn open_records(path: &Path, delimiter: u8) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn read_header(
    records: &mut csv::StringRecordsIter<'_, std::fs::File>,
    path: &Path,
) -> Result<Vec<String>> {
    for record in records.by_ref() {
        let record: StringRecord = record.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let headers: Vec<String> = record.iter().map(normalize_header).collect();
        if headers.iter().any(|h| !h.is_empty()) {
            return Ok(headers);
        }
    }
    Err(IngestError::MissingHeader {
        path: path.to_path_buf(),
    })
}

/// Reads only the header row of a CSV file.
///
/// # Errors
///
/// Fails when the file cannot be opened or has no non-blank row.
pub fn read_csv_headers(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = open_records(path, delimiter)?;
    let mut records = reader.records();
    read_header(&mut records, path)
}

/// Reads a CSV file: first non-blank row is the header, fully blank rows are
/// skipped, cells are trimmed and stripped of byte-order marks.
///
/// # Errors
///
/// Fails when the file cannot be opened, a record is malformed, or there is
/// no header row.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<CsvTable> {
    let mut reader = open_records(path, delimiter)?;
    let mut records = reader.records();
    let headers = read_header(&mut records, path)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );
    Ok(CsvTable { headers, rows })
}
