//! Transition decision errors.

use crate::core::{GuardError, State};
use thiserror::Error;

/// Why a requested transition was not permitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// No transition is registered from `from` to `to`. No guard ran.
    #[error("invalid transition from '{from}' to '{to}'")]
    InvalidTransition { from: State, to: State },

    /// The transition is registered but a guard vetoed it.
    #[error("transition from '{from}' to '{to}' denied: {source}")]
    Denied {
        from: State,
        to: State,
        #[source]
        source: GuardError,
    },
}

impl TransitionError {
    pub fn is_invalid(&self) -> bool {
        matches!(self, TransitionError::InvalidTransition { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, TransitionError::Denied { .. })
    }

    /// The guard's error, when a guard caused the rejection.
    pub fn guard_error(&self) -> Option<&GuardError> {
        match self {
            TransitionError::Denied { source, .. } => Some(source),
            TransitionError::InvalidTransition { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_both_states() {
        let err = TransitionError::InvalidTransition {
            from: State::from("pending"),
            to: State::from("finished"),
        };
        assert_eq!(
            err.to_string(),
            "invalid transition from 'pending' to 'finished'"
        );
        assert!(err.is_invalid());
        assert!(err.guard_error().is_none());
    }

    #[test]
    fn denial_carries_guard_error() {
        let err = TransitionError::Denied {
            from: State::from("started"),
            to: State::from("finished"),
            source: GuardError::denied("report missing"),
        };
        assert!(err.is_denied());
        assert_eq!(
            err.guard_error(),
            Some(&GuardError::denied("report missing"))
        );
        assert_eq!(
            err.to_string(),
            "transition from 'started' to 'finished' denied: report missing"
        );
    }
}
