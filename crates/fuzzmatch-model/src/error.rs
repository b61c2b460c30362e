use thiserror::Error;

use crate::phase::MatchPhase;

/// Errors raised by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Options failed validation; nothing was computed.
    #[error("invalid match options: {0}")]
    InvalidOptions(String),
    /// A cancellation request was observed; partial work was discarded.
    #[error("matching cancelled during {phase}")]
    Cancelled { phase: MatchPhase },
    /// A hand-built score matrix had rows of different lengths.
    #[error("matrix row {row} has {found} scores, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatchError>;
