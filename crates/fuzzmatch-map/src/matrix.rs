//! Similarity matrix over the cross product of two label lists.

use fuzzmatch_model::{DEFAULT_PROGRESS_INTERVAL, MatchError, MatchPhase, Result};
use tracing::debug;

use crate::progress::{CancellationToken, Progress};
use crate::score::Scorer;

/// Dense row-major score matrix: one row per left label, one column per
/// right label.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from explicit rows.
    ///
    /// A matrix with no rows has zero columns.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::RaggedMatrix`] if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut scores = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(MatchError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            scores.extend(values);
        }
        Ok(Self {
            rows: row_count,
            cols,
            scores,
        })
    }

    /// Number of left labels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of right labels.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of `(left, right)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, left: usize, right: usize) -> f64 {
        assert!(right < self.cols, "right index {right} out of bounds");
        self.scores[left * self.cols + right]
    }

    /// All scores of one left label.
    pub fn row(&self, left: usize) -> &[f64] {
        let start = left * self.cols;
        &self.scores[start..start + self.cols]
    }

    /// Highest score in the matrix, if any.
    pub fn max_score(&self) -> Option<f64> {
        self.scores.iter().copied().reduce(f64::max)
    }
}

/// Scores every left/right pair, reporting progress and honouring
/// cancellation between rows and after each progress notification.
pub struct MatrixBuilder<'a, S: Scorer + ?Sized> {
    scorer: &'a S,
    progress_interval: usize,
    cancel: CancellationToken,
}

impl<'a, S: Scorer + ?Sized> MatrixBuilder<'a, S> {
    pub fn new(scorer: &'a S) -> Self {
        Self {
            scorer,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            cancel: CancellationToken::default(),
        }
    }

    /// Pairs scored between progress notifications (minimum 1).
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Builds the full matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Cancelled`] if cancellation is observed; the
    /// partially filled matrix is dropped.
    pub fn build<L, R>(
        &self,
        left: &[L],
        right: &[R],
        progress: &mut dyn Progress,
    ) -> Result<SimilarityMatrix>
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let total = left.len() * right.len();
        let mut scores = Vec::with_capacity(total);
        let mut completed = 0usize;
        let mut last_reported = 0usize;

        for left_value in left {
            self.cancel.checkpoint(MatchPhase::Scoring)?;
            for right_value in right {
                scores.push(self.scorer.score(left_value.as_ref(), right_value.as_ref()));
                completed += 1;
                if completed % self.progress_interval == 0 {
                    progress.report(completed, total, MatchPhase::Scoring);
                    last_reported = completed;
                    self.cancel.checkpoint(MatchPhase::Scoring)?;
                }
            }
        }
        if total > 0 && last_reported != total {
            progress.report(total, total, MatchPhase::Scoring);
        }

        debug!(
            rows = left.len(),
            cols = right.len(),
            comparisons = total,
            "similarity matrix built"
        );
        Ok(SimilarityMatrix {
            rows: left.len(),
            cols: right.len(),
            scores,
        })
    }
}
