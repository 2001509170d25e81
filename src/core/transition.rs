//! Transition keys identifying edges of the transition graph.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One edge of the transition graph: an origin state and the event (target
/// state) reached by firing the transition.
///
/// Keys are plain values compared field by field. Any pair is a valid key,
/// including a self-loop where origin and event are equal.
///
/// # Example
///
/// ```rust
/// use fsm_guard::core::TransitionKey;
///
/// let key = TransitionKey::new("pending", "started");
/// assert_eq!(key, TransitionKey::from(("pending", "started")));
/// assert_eq!(key.to_string(), "pending -> started");
/// assert!(!key.is_self_loop());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TransitionKey {
    /// The state the subject must currently be in
    pub origin: State,
    /// The state the subject moves to
    pub event: State,
}

impl TransitionKey {
    pub fn new(origin: impl Into<State>, event: impl Into<State>) -> Self {
        Self {
            origin: origin.into(),
            event: event.into(),
        }
    }

    /// True when the transition leaves the subject in its origin state.
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.event
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.event)
    }
}

impl<A, B> From<(A, B)> for TransitionKey
where
    A: Into<State>,
    B: Into<State>,
{
    fn from((origin, event): (A, B)) -> Self {
        Self::new(origin, event)
    }
}
