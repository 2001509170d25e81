//! A ruleset bound to one subject.
//!
//! The machine asks its ruleset for a decision and, only when the transition
//! is approved, writes the goal state into the subject. A denied transition
//! leaves the subject untouched and hands back the ruleset's error as is.

mod builder;
mod error;

pub use builder::MachineBuilder;
pub use error::BuildError;

use crate::core::{State, Stater};
use crate::ruleset::{Ruleset, TransitionError};
use std::sync::Arc;

/// Applies approved transitions to a caller-owned subject.
///
/// # Example
///
/// ```rust
/// use fsm_guard::core::State;
/// use fsm_guard::{stater, Machine, Ruleset};
///
/// #[derive(Clone)]
/// struct Job {
///     state: State,
/// }
/// stater!(Job, state);
///
/// let rules = Ruleset::from_transitions([("pending", "started"), ("started", "finished")]);
/// let mut job = Job { state: State::from("pending") };
///
/// let mut machine = Machine::builder().rules(rules).subject(&mut job).build().unwrap();
/// assert!(machine.transition("finished").unwrap_err().is_invalid());
/// machine.transition("started").unwrap();
/// assert_eq!(machine.current_state(), "started");
/// drop(machine);
///
/// assert_eq!(job.state, "started");
/// ```
pub struct Machine<'a, S> {
    rules: Arc<Ruleset<S>>,
    subject: &'a mut S,
}

impl<'a, S> Machine<'a, S> {
    pub fn new(rules: impl Into<Arc<Ruleset<S>>>, subject: &'a mut S) -> Self {
        Self {
            rules: rules.into(),
            subject,
        }
    }

    pub fn builder() -> MachineBuilder<'a, S> {
        MachineBuilder::new()
    }

    pub fn rules(&self) -> &Arc<Ruleset<S>> {
        &self.rules
    }

    pub fn subject(&self) -> &S {
        &*self.subject
    }
}

impl<S: Stater> Machine<'_, S> {
    pub fn current_state(&self) -> &State {
        self.subject.current_state()
    }

    /// Like [`transition`](Self::transition), but guards run on the calling
    /// thread in registration order, so the subject does not need to be
    /// `Clone` or shareable across threads.
    pub fn transition_inline(&mut self, goal: impl Into<State>) -> Result<(), TransitionError> {
        let goal = goal.into();
        self.rules.permitted_inline(&*self.subject, &goal)?;
        self.apply(goal);
        Ok(())
    }

    fn apply(&mut self, goal: State) {
        tracing::debug!(from = %self.subject.current_state(), to = %goal, "transition applied");
        self.subject.set_state(goal);
    }
}

impl<S> Machine<'_, S>
where
    S: Stater + Clone + Send + Sync + 'static,
{
    /// Check whether `goal` is reachable right now without applying it.
    pub fn can_transition(&self, goal: impl Into<State>) -> Result<(), TransitionError> {
        self.rules.permitted(&*self.subject, &goal.into())
    }

    /// Move the subject to `goal` if the ruleset permits it.
    ///
    /// The subject's state is written once, after the decision resolves, and
    /// only on approval.
    pub fn transition(&mut self, goal: impl Into<State>) -> Result<(), TransitionError> {
        let goal = goal.into();
        self.rules.permitted(&*self.subject, &goal)?;
        self.apply(goal);
        Ok(())
    }
}
