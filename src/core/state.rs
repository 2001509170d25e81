//! State labels and the `Stater` capability.
//!
//! A `State` is an opaque label. The engine never enumerates valid states;
//! a label is meaningful only through the transitions registered for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Label identifying a point in a subject's life-cycle.
///
/// The default label is the empty string, which is how a subject that has
/// not chosen an initial state presents itself.
///
/// Labels are reference counted, so cloning a `State` never copies the
/// string.
///
/// # Example
///
/// ```rust
/// use fsm_guard::core::State;
///
/// let pending = State::from("pending");
/// assert_eq!(pending, "pending");
/// assert!(!pending.is_unset());
/// assert!(State::default().is_unset());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Arc<str>);

impl State {
    /// Create a state from any string-like label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        State(label.into())
    }

    /// Borrow the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty label a subject carries before it is initialized.
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for State {
    fn default() -> Self {
        State(Arc::from(""))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        State(Arc::from(label))
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        State(Arc::from(label))
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Capability of an entity whose current state can be read and replaced.
///
/// The subject is owned by the caller. Guards only ever see `&self`; the
/// state is replaced exclusively by [`Machine::transition`] after a
/// transition is approved.
///
/// [`Machine::transition`]: crate::machine::Machine::transition
///
/// # Example
///
/// ```rust
/// use fsm_guard::core::{State, Stater};
///
/// struct Order {
///     state: State,
/// }
///
/// impl Stater for Order {
///     fn current_state(&self) -> &State {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.state = state;
///     }
/// }
///
/// let mut order = Order { state: State::from("pending") };
/// order.set_state(State::from("started"));
/// assert_eq!(order.current_state(), "started");
/// ```
pub trait Stater {
    /// Read the current state.
    fn current_state(&self) -> &State;

    /// Replace the current state.
    fn set_state(&mut self, state: State);
}
