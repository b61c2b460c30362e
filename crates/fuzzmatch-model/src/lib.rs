//! Shared types for fuzzy label matching.

pub mod error;
pub mod matching;
pub mod options;
pub mod phase;
pub mod result;

pub use error::{MatchError, Result};
pub use matching::{Assignment, Match, MatchPass};
pub use options::{
    DEFAULT_MIN_SCORE, DEFAULT_PROGRESS_INTERVAL, DEFAULT_THRESHOLDS, MatchOptions,
    NO_MATCH_FOUND, ScoringPolicy,
};
pub use phase::MatchPhase;
pub use result::{ResultHeaders, ResultRow, ResultSet, RowKind};
