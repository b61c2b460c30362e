//! The ranked result set handed to output sinks.

use serde::{Deserialize, Serialize};

/// Kind of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// A committed left/right pairing.
    Matched,
    /// A left item that received no match.
    UnmatchedLeft,
    /// A right item that received no match.
    UnmatchedRight,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub kind: RowKind,
    /// Left position, absent for unmatched right rows.
    pub left_index: Option<usize>,
    /// Right position, absent for unmatched left rows.
    pub right_index: Option<usize>,
    /// Left value, or the sentinel for unmatched right rows.
    pub left_value: String,
    /// Right value, or the sentinel for unmatched left rows.
    pub right_value: String,
    pub score: f64,
    /// Pass-through annotation joined on the left position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// Column names of the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultHeaders {
    pub left: String,
    pub right: String,
    pub score: String,
    /// Present only when an annotation column was carried through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl ResultHeaders {
    /// Header of the score column in every output format.
    pub const SCORE: &'static str = "Match Score";

    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            score: Self::SCORE.to_string(),
            annotation: None,
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Option<String>) -> Self {
        self.annotation = annotation;
        self
    }
}

impl Default for ResultHeaders {
    fn default() -> Self {
        Self::new("Left", "Right")
    }
}

/// Matches ordered by descending score, followed by unmatched rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub headers: ResultHeaders,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn matched(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|row| row.kind == RowKind::Matched)
    }

    pub fn match_count(&self) -> usize {
        self.matched().count()
    }

    pub fn unmatched_left_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.kind == RowKind::UnmatchedLeft)
            .count()
    }

    pub fn unmatched_right_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.kind == RowKind::UnmatchedRight)
            .count()
    }

    /// Matched rows with a perfect score, in result order.
    pub fn perfect_matches(&self) -> impl Iterator<Item = &ResultRow> {
        self.matched().filter(|row| row.score >= 100.0)
    }
}
