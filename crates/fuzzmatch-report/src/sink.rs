//! CSV and JSON sinks for a [`ResultSet`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fuzzmatch_model::ResultSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OutputError, Result};
use crate::format::format_score;

/// Destination for a computed result set.
pub trait OutputSink {
    /// Writes every row in result-set order.
    ///
    /// # Errors
    ///
    /// Returns an [`OutputError`]; the result set itself is untouched and the
    /// caller may retry with another sink.
    fn write(&self, results: &ResultSet) -> Result<()>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Guesses the format from a file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }

    /// Builds the file sink for this format.
    pub fn sink(self, path: impl Into<PathBuf>) -> Box<dyn OutputSink> {
        match self {
            Self::Csv => Box::new(CsvSink::new(path)),
            Self::Json => Box::new(JsonSink::new(path)),
        }
    }
}

/// Writes `<left>,<right>,Match Score[,<annotation>]` rows.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for CsvSink {
    fn write(&self, results: &ResultSet) -> Result<()> {
        let file = create(&self.path)?;
        write_csv(file, results)?;
        info!(path = %self.path.display(), rows = results.rows.len(), "wrote csv results");
        Ok(())
    }
}

/// Writes the serialized result set as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for JsonSink {
    fn write(&self, results: &ResultSet) -> Result<()> {
        let file = create(&self.path)?;
        write_json(file, results)?;
        info!(path = %self.path.display(), rows = results.rows.len(), "wrote json results");
        Ok(())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the result set as CSV to any writer.
///
/// # Errors
///
/// Returns [`OutputError::Csv`] when a record cannot be written.
pub fn write_csv<W: Write>(writer: W, results: &ResultSet) -> Result<()> {
    let headers = &results.headers;
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        headers.left.as_str(),
        headers.right.as_str(),
        headers.score.as_str(),
    ];
    if let Some(annotation) = headers.annotation.as_deref() {
        header.push(annotation);
    }
    writer.write_record(&header)?;

    for row in &results.rows {
        let score = format_score(row.score);
        let mut record = vec![row.left_value.as_str(), row.right_value.as_str(), score.as_str()];
        if headers.annotation.is_some() {
            record.push(row.annotation.as_deref().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the result set as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns [`OutputError::Json`] when serialization or the write fails.
pub fn write_json<W: Write>(mut writer: W, results: &ResultSet) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Csv);
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
