//! Greedy one-to-one assignment over a similarity matrix.
//!
//! Two passes run in order:
//!
//! 1. **Threshold sweep**: for each threshold (strictest first), every
//!    unmatched left label takes the first unmatched right label scoring at
//!    or above it.
//! 2. **Global greedy**: the best remaining pair is committed repeatedly
//!    until one side is exhausted or the best score drops below the minimum.
//!    Ties go to the first pair in row-major order.
//!
//! Every committed pair consumes both indices, so each pass terminates.

use fuzzmatch_model::{
    Assignment, DEFAULT_MIN_SCORE, DEFAULT_THRESHOLDS, Match, MatchOptions, MatchPass, MatchPhase,
    Result,
};
use tracing::{debug, trace};

use crate::matrix::SimilarityMatrix;
use crate::progress::{CancellationToken, Progress};

/// Runs the two-pass greedy assignment.
#[derive(Debug, Clone)]
pub struct GreedyAssigner {
    thresholds: Vec<f64>,
    min_score: f64,
    cancel: CancellationToken,
}

impl Default for GreedyAssigner {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            min_score: DEFAULT_MIN_SCORE,
            cancel: CancellationToken::default(),
        }
    }
}

impl GreedyAssigner {
    pub fn new(min_score: f64) -> Self {
        Self {
            min_score,
            ..Self::default()
        }
    }

    /// Uses the minimum score and threshold sweep of validated options.
    pub fn from_options(options: &MatchOptions) -> Self {
        Self {
            thresholds: options.thresholds.clone(),
            min_score: options.min_score,
            cancel: CancellationToken::default(),
        }
    }

    /// Replaces the sweep; thresholds run in the given order.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Assigns left labels to right labels.
    ///
    /// A sweep threshold below the minimum score is raised to it, so no pass
    /// ever commits a pair scoring under `min_score`.
    ///
    /// # Errors
    ///
    /// Returns [`fuzzmatch_model::MatchError::Cancelled`] if cancellation is
    /// observed before a greedy iteration.
    pub fn assign(
        &self,
        matrix: &SimilarityMatrix,
        progress: &mut dyn Progress,
    ) -> Result<Assignment> {
        let mut state = Consumed::new(matrix.rows(), matrix.cols());

        for &threshold in &self.thresholds {
            let threshold = threshold.max(self.min_score);
            let before = state.matches.len();
            for left in 0..matrix.rows() {
                if state.left[left] {
                    continue;
                }
                let hit = (0..matrix.cols())
                    .find(|&right| !state.right[right] && matrix.get(left, right) >= threshold);
                if let Some(right) = hit {
                    let pass = MatchPass::Threshold { threshold };
                    state.commit(left, right, matrix.get(left, right), pass);
                }
            }
            debug!(
                threshold,
                committed = state.matches.len() - before,
                "threshold sweep complete"
            );
        }

        let target = matrix.rows().min(matrix.cols());
        let swept = state.matches.len();
        while state.matches.len() < target {
            self.cancel.checkpoint(MatchPhase::Assignment)?;
            let Some((left, right, score)) = state.best_remaining(matrix) else {
                break;
            };
            if score < self.min_score {
                trace!(score, min_score = self.min_score, "best remaining pair below minimum");
                break;
            }
            state.commit(left, right, score, MatchPass::Greedy);
            progress.report(state.matches.len(), target, MatchPhase::Assignment);
        }
        debug!(
            committed = state.matches.len() - swept,
            "greedy pass complete"
        );

        Ok(state.finish())
    }
}

/// Index consumption state, owned by a single assignment run.
struct Consumed {
    left: Vec<bool>,
    right: Vec<bool>,
    matches: Vec<Match>,
}

impl Consumed {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            left: vec![false; rows],
            right: vec![false; cols],
            matches: Vec::new(),
        }
    }

    fn commit(&mut self, left: usize, right: usize, score: f64, pass: MatchPass) {
        self.left[left] = true;
        self.right[right] = true;
        self.matches.push(Match {
            left,
            right,
            score,
            pass,
        });
    }

    /// Highest-scoring unconsumed pair; the first in row-major order wins ties.
    fn best_remaining(&self, matrix: &SimilarityMatrix) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for left in (0..matrix.rows()).filter(|&left| !self.left[left]) {
            let row = matrix.row(left);
            for right in (0..matrix.cols()).filter(|&right| !self.right[right]) {
                let score = row[right];
                if best.is_none_or(|(_, _, top)| score > top) {
                    best = Some((left, right, score));
                }
            }
        }
        best
    }

    fn finish(self) -> Assignment {
        Assignment {
            matches: self.matches,
            unmatched_left: unused(&self.left),
            unmatched_right: unused(&self.right),
        }
    }
}

fn unused(consumed: &[bool]) -> Vec<usize> {
    consumed
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use fuzzmatch_model::MatchError;

    use super::*;
    use crate::progress::NoProgress;

    fn matrix(rows: Vec<Vec<f64>>) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    fn pairs(assignment: &Assignment) -> Vec<(usize, usize)> {
        assignment.matches.iter().map(|m| (m.left, m.right)).collect()
    }

    #[test]
    fn threshold_sweep_takes_first_fit_not_best_fit() {
        // Row 0 reaches 95 at column 0 before its 99 at column 1.
        let scores = matrix(vec![vec![95.0, 99.0], vec![10.0, 96.0]]);
        let assignment = GreedyAssigner::default()
            .assign(&scores, &mut NoProgress)
            .unwrap();
        assert_eq!(pairs(&assignment), vec![(0, 0), (1, 1)]);
        assert_eq!(
            assignment.matches[0].pass,
            MatchPass::Threshold { threshold: 95.0 }
        );
    }

    #[test]
    fn exact_threshold_claims_before_near_exact() {
        let scores = matrix(vec![vec![96.0, 50.0], vec![100.0, 40.0]]);
        let assignment = GreedyAssigner::default()
            .assign(&scores, &mut NoProgress)
            .unwrap();
        // Row 1 claims column 0 at 100 before row 0 can take it at 95.
        assert_eq!(assignment.matches[0].left, 1);
        assert_eq!(assignment.matches[0].right, 0);
        assert_eq!(pairs(&assignment), vec![(1, 0), (0, 1)]);
        assert_eq!(assignment.matches[1].pass, MatchPass::Greedy);
    }

    #[test]
    fn greedy_picks_global_best_first() {
        let scores = matrix(vec![vec![60.0, 70.0], vec![80.0, 65.0]]);
        let assignment = GreedyAssigner::default()
            .assign(&scores, &mut NoProgress)
            .unwrap();
        assert_eq!(pairs(&assignment), vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn greedy_ties_resolve_row_major() {
        let scores = matrix(vec![vec![50.0, 70.0], vec![70.0, 50.0]]);
        let assignment = GreedyAssigner::default()
            .assign(&scores, &mut NoProgress)
            .unwrap();
        assert_eq!(pairs(&assignment), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn min_score_boundary_is_inclusive() {
        let at = matrix(vec![vec![20.0]]);
        let below = matrix(vec![vec![19.0]]);
        let assigner = GreedyAssigner::new(20.0);
        assert_eq!(assigner.assign(&at, &mut NoProgress).unwrap().matches.len(), 1);
        let missed = assigner.assign(&below, &mut NoProgress).unwrap();
        assert!(missed.matches.is_empty());
        assert_eq!(missed.unmatched_left, vec![0]);
        assert_eq!(missed.unmatched_right, vec![0]);
    }

    #[test]
    fn empty_side_yields_residuals() {
        let scores = SimilarityMatrix::from_rows(vec![vec![], vec![]]).unwrap();
        let assignment = GreedyAssigner::default()
            .assign(&scores, &mut NoProgress)
            .unwrap();
        assert!(assignment.matches.is_empty());
        assert_eq!(assignment.unmatched_left, vec![0, 1]);
        assert!(assignment.unmatched_right.is_empty());
    }

    #[test]
    fn thresholds_below_min_score_are_raised() {
        let scores = matrix(vec![vec![30.0]]);
        let assignment = GreedyAssigner::new(40.0)
            .with_thresholds(vec![25.0])
            .assign(&scores, &mut NoProgress)
            .unwrap();
        assert!(assignment.matches.is_empty());
    }

    #[test]
    fn greedy_reports_progress_per_commit() {
        let scores = matrix(vec![vec![60.0, 10.0], vec![10.0, 50.0], vec![5.0, 5.0]]);
        let mut reports = Vec::new();
        GreedyAssigner::default()
            .assign(&scores, &mut |done: usize, total: usize, phase: MatchPhase| {
                reports.push((done, total, phase));
            })
            .unwrap();
        assert_eq!(
            reports,
            vec![
                (1, 2, MatchPhase::Assignment),
                (2, 2, MatchPhase::Assignment)
            ]
        );
    }

    #[test]
    fn cancellation_stops_greedy_pass() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let scores = matrix(vec![vec![60.0]]);
        let result = GreedyAssigner::default()
            .with_cancellation(cancel)
            .assign(&scores, &mut NoProgress);
        assert_eq!(
            result,
            Err(MatchError::Cancelled {
                phase: MatchPhase::Assignment
            })
        );
    }

    #[test]
    fn assignment_is_deterministic() {
        let scores = matrix(vec![
            vec![40.0, 40.0, 40.0],
            vec![40.0, 40.0, 40.0],
            vec![95.0, 40.0, 100.0],
        ]);
        let assigner = GreedyAssigner::default();
        let first = assigner.assign(&scores, &mut NoProgress).unwrap();
        let second = assigner.assign(&scores, &mut NoProgress).unwrap();
        assert_eq!(first, second);
        assert_eq!(pairs(&first), vec![(2, 2), (0, 0), (1, 1)]);
    }
}
