//! Column selection by header name or position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Header of the annotation column picked up automatically when present.
pub const ORIGINAL_VARIATION: &str = "Original Variation";

/// Identifies one column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelector {
    /// Header name, compared case-insensitively after whitespace trimming.
    Name(String),
    /// 1-based column position.
    Position(usize),
}

impl ColumnSelector {
    /// Resolves the selector to a 0-based column index.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnknownColumn`] when no header matches.
    pub fn resolve(&self, headers: &[String]) -> Result<usize> {
        let found = match self {
            Self::Name(name) => find_header(headers, name),
            Self::Position(position) => position
                .checked_sub(1)
                .filter(|index| *index < headers.len()),
        };
        found.ok_or_else(|| IngestError::UnknownColumn {
            selector: self.to_string(),
            available: headers.to_vec(),
        })
    }
}

impl FromStr for ColumnSelector {
    type Err = IngestError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IngestError::InvalidSelector(raw.to_string()));
        }
        if let Some(digits) = trimmed.strip_prefix('#') {
            return match digits.parse::<usize>() {
                Ok(position) if position > 0 => Ok(Self::Position(position)),
                _ => Err(IngestError::InvalidSelector(raw.to_string())),
            };
        }
        Ok(Self::Name(trimmed.to_string()))
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Position(position) => write!(f, "#{position}"),
        }
    }
}

/// How the optional annotation column is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSelector {
    /// Use the "Original Variation" column if the table has one.
    #[default]
    Auto,
    /// Use this column; it must exist.
    Column(ColumnSelector),
    /// Never carry an annotation column.
    Disabled,
}

pub(crate) fn find_header(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec!["Store".into(), "Customer Name".into(), "Original Variation".into()]
    }

    #[test]
    fn parses_names_and_positions() {
        assert_eq!(
            "Store".parse::<ColumnSelector>().unwrap(),
            ColumnSelector::Name("Store".into())
        );
        assert_eq!(
            "#2".parse::<ColumnSelector>().unwrap(),
            ColumnSelector::Position(2)
        );
        assert!("#0".parse::<ColumnSelector>().is_err());
        assert!("#x".parse::<ColumnSelector>().is_err());
        assert!("  ".parse::<ColumnSelector>().is_err());
    }

    #[test]
    fn resolves_case_insensitively() {
        let selector = ColumnSelector::Name("customer name".into());
        assert_eq!(selector.resolve(&headers()).unwrap(), 1);
        assert_eq!(ColumnSelector::Position(3).resolve(&headers()).unwrap(), 2);
    }

    #[test]
    fn unknown_column_lists_available_headers() {
        let error = ColumnSelector::Position(9).resolve(&headers()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("'#9'"));
        assert!(message.contains("Store, Customer Name, Original Variation"));
    }
}
