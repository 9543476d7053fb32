use thiserror::Error;

use super::state::QuizPhase;
use crate::stats::StatsError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: QuizPhase,
    },

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Quiz session has shut down")]
    Closed,
}

impl SessionError {
    /// Whether this error is a rejected input rather than a failure
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, SessionError::InvalidTransition { .. })
    }
}
