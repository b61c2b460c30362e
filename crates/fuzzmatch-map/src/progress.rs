//! Progress notification and cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fuzzmatch_model::{MatchError, MatchPhase, Result};

/// Receives progress notifications from long-running stages.
///
/// Implementations must return quickly; the engine waits for each call.
pub trait Progress {
    fn report(&mut self, completed: usize, total: usize, phase: MatchPhase);
}

impl<F> Progress for F
where
    F: FnMut(usize, usize, MatchPhase),
{
    fn report(&mut self, completed: usize, total: usize, phase: MatchPhase) {
        self(completed, total, phase);
    }
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _completed: usize, _total: usize, _phase: MatchPhase) {}
}

/// Shared flag used to request that a run stops at its next checkpoint.
///
/// Clones observe the same flag, so a token can be handed to another thread
/// or captured by a progress callback.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns [`MatchError::Cancelled`] once cancellation was requested.
    pub(crate) fn checkpoint(&self, phase: MatchPhase) -> Result<()> {
        if self.is_cancelled() {
            tracing::debug!(%phase, "cancellation observed");
            return Err(MatchError::Cancelled { phase });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(observer.checkpoint(MatchPhase::Scoring).is_ok());
        token.cancel();
        assert!(observer.is_cancelled());
        assert_eq!(
            observer.checkpoint(MatchPhase::Assignment),
            Err(MatchError::Cancelled {
                phase: MatchPhase::Assignment
            })
        );
    }

    #[test]
    fn closures_receive_reports() {
        let mut seen = Vec::new();
        {
            let mut sink = |done: usize, total: usize, phase: MatchPhase| {
                seen.push((done, total, phase));
            };
            sink.report(1, 2, MatchPhase::Scoring);
        }
        assert_eq!(seen, vec![(1, 2, MatchPhase::Scoring)]);
    }
}
