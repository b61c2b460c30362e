//! End-to-end matching run: score, assign, assemble.

use std::time::Instant;

use fuzzmatch_model::{Assignment, MatchOptions, ResultHeaders, ResultSet, Result};
use tracing::{info, info_span};

use crate::assemble::assemble;
use crate::assign::GreedyAssigner;
use crate::matrix::MatrixBuilder;
use crate::progress::{CancellationToken, Progress};
use crate::score::SimilarityScorer;

/// The two label lists to match, plus pass-through data for the output.
#[derive(Debug, Clone)]
pub struct MatchRequest<'a> {
    pub left: &'a [String],
    pub right: &'a [String],
    /// Optional per-left-label annotation, aligned by position.
    pub annotations: Option<&'a [String]>,
    pub headers: ResultHeaders,
}

impl<'a> MatchRequest<'a> {
    pub fn new(left: &'a [String], right: &'a [String]) -> Self {
        Self {
            left,
            right,
            annotations: None,
            headers: ResultHeaders::default(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Option<&'a [String]>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: ResultHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub(crate) fn left_value(&self, index: usize) -> &str {
        self.left.get(index).map_or("", String::as_str)
    }

    pub(crate) fn right_value(&self, index: usize) -> &str {
        self.right.get(index).map_or("", String::as_str)
    }

    pub(crate) fn annotation(&self, index: usize) -> Option<String> {
        self.annotations
            .and_then(|values| values.get(index))
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Raw assignment in commit order.
    pub assignment: Assignment,
    /// Ranked rows ready for an output sink.
    pub results: ResultSet,
}

/// Runs the full matching pipeline with one set of validated options.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    options: MatchOptions,
    cancel: CancellationToken,
}

impl FuzzyMatcher {
    /// Validates options up front so a bad configuration never reaches the
    /// matrix builder.
    ///
    /// # Errors
    ///
    /// Returns [`fuzzmatch_model::MatchError::InvalidOptions`].
    pub fn new(options: MatchOptions) -> Result<Self> {
        Ok(Self {
            options: options.validate()?,
            cancel: CancellationToken::default(),
        })
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn scorer(&self) -> SimilarityScorer {
        SimilarityScorer::new(self.options.policy)
    }

    /// Scores every pair, assigns greedily and assembles the ranked result.
    ///
    /// # Errors
    ///
    /// Returns [`fuzzmatch_model::MatchError::Cancelled`] when the token is
    /// cancelled; no partial result is returned.
    pub fn run(
        &self,
        request: &MatchRequest<'_>,
        progress: &mut dyn Progress,
    ) -> Result<MatchOutcome> {
        let span = info_span!(
            "match",
            left = request.left.len(),
            right = request.right.len(),
            policy = self.options.policy.as_str()
        );
        let _guard = span.enter();

        let scorer = self.scorer();
        let scoring_start = Instant::now();
        let matrix = MatrixBuilder::new(&scorer)
            .with_progress_interval(self.options.progress_interval)
            .with_cancellation(self.cancel.clone())
            .build(request.left, request.right, progress)?;
        info!(
            comparisons = request.left.len() * request.right.len(),
            duration_ms = scoring_start.elapsed().as_millis(),
            "scoring complete"
        );

        let assign_start = Instant::now();
        let assignment = GreedyAssigner::from_options(&self.options)
            .with_cancellation(self.cancel.clone())
            .assign(&matrix, progress)?;
        info!(
            matches = assignment.matches.len(),
            from_sweep = assignment.threshold_count(),
            unmatched_left = assignment.unmatched_left.len(),
            unmatched_right = assignment.unmatched_right.len(),
            duration_ms = assign_start.elapsed().as_millis(),
            "assignment complete"
        );

        let results = assemble(&assignment, request, &self.options);
        Ok(MatchOutcome {
            assignment,
            results,
        })
    }
}
