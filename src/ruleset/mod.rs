//! The transition table and its guard engine.
//!
//! A `Ruleset` maps each registered [`TransitionKey`] to the guards that
//! can veto it. Deciding a transition is a single lookup followed, when
//! guards exist, by running all of them and reducing their outcomes:
//!
//! - key absent: [`TransitionError::InvalidTransition`], no guard runs
//! - key present, no guards: approved
//! - key present with guards: approved once every guard approves, denied by
//!   the first failure observed
//!
//! Registration takes `&mut self`, so a ruleset is fully built before it is
//! shared (typically behind an `Arc`) with concurrent readers.
//!
//! # Example
//!
//! ```rust
//! use fsm_guard::core::{GuardError, State};
//! use fsm_guard::{ruleset, stater, Ruleset};
//!
//! #[derive(Clone)]
//! struct Thing {
//!     state: State,
//! }
//! stater!(Thing, state);
//!
//! let mut rules: Ruleset<Thing> = ruleset! {
//!     "pending" => "started",
//!     "started" => "finished",
//! };
//! rules.add_rule(("started", "finished"), |_thing: &Thing, _goal: &State| {
//!     Err(GuardError::denied("report not filed"))
//! });
//!
//! let pending = Thing { state: State::from("pending") };
//! assert!(rules.permitted(&pending, &State::from("started")).is_ok());
//! assert!(rules.permitted(&pending, &State::from("finished")).unwrap_err().is_invalid());
//!
//! let started = Thing { state: State::from("started") };
//! assert!(rules.permitted(&started, &State::from("finished")).unwrap_err().is_denied());
//! ```

mod audit;
mod error;
mod evaluation;

pub use audit::AuditResult;
pub use error::TransitionError;
pub use evaluation::Evaluation;

use crate::core::{Guard, GuardError, State, Stater, TransitionKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of transitions and their guards.
pub struct Ruleset<S> {
    transitions: HashMap<TransitionKey, Vec<Guard<S>>>,
    evaluation: Evaluation,
}

impl<S> Ruleset<S> {
    /// Create an empty ruleset using parallel guard evaluation.
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            evaluation: Evaluation::default(),
        }
    }

    /// Create a ruleset with the given guard-free transitions registered.
    pub fn from_transitions<I, K>(transitions: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<TransitionKey>,
    {
        let mut rules = Self::new();
        for key in transitions {
            rules.add_transition(key);
        }
        rules
    }

    /// Choose how guards are evaluated.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Register a transition. Re-registering a known key keeps its guards.
    pub fn add_transition(&mut self, key: impl Into<TransitionKey>) {
        self.transitions.entry(key.into()).or_default();
    }

    /// Append a guard to a transition, registering the transition if needed.
    pub fn add_guard(&mut self, key: impl Into<TransitionKey>, guard: Guard<S>) {
        let key = key.into();
        tracing::trace!(
            transition = %key,
            guard = guard.label().unwrap_or("<unnamed>"),
            "guard registered"
        );
        self.transitions.entry(key).or_default().push(guard);
    }

    /// Append a guard function to a transition, registering the transition
    /// if needed.
    pub fn add_rule<F>(&mut self, key: impl Into<TransitionKey>, rule: F)
    where
        F: Fn(&S, &State) -> Result<(), GuardError> + Send + Sync + 'static,
    {
        self.add_guard(key, Guard::new(rule));
    }

    pub fn contains(&self, key: &TransitionKey) -> bool {
        self.transitions.contains_key(key)
    }

    /// Guards registered for a transition, in registration order.
    pub fn guards(&self, key: &TransitionKey) -> Option<&[Guard<S>]> {
        self.transitions.get(key).map(Vec::as_slice)
    }

    /// Number of registered transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &TransitionKey> {
        self.transitions.keys()
    }

    /// Goal states registered from `origin`, sorted.
    pub fn targets_from(&self, origin: &State) -> Vec<&State> {
        let mut targets: Vec<&State> = self
            .transitions
            .keys()
            .filter(|key| &key.origin == origin)
            .map(|key| &key.event)
            .collect();
        targets.sort();
        targets
    }
}

impl<S> Ruleset<S>
where
    S: Stater,
{
    /// Decide whether `subject` may move to `goal`.
    ///
    /// Guards see an owned snapshot of the subject when evaluated in
    /// parallel, which is why the subject must be `Clone`. The snapshot is
    /// only taken when two or more guards go to worker threads. Once a
    /// failure is observed the call returns without waiting for guards still
    /// running.
    pub fn permitted(&self, subject: &S, goal: &State) -> Result<(), TransitionError>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.decide(subject, goal, |guards| {
            let snapshot = || Arc::new(subject.clone());
            self.evaluation.run(guards, subject, goal, snapshot)
        })
    }

    /// [`permitted`](Self::permitted) for a subject already behind an `Arc`.
    ///
    /// Worker threads share the caller's `Arc`, so the subject does not need
    /// to be `Clone`.
    pub fn permitted_shared(&self, subject: &Arc<S>, goal: &State) -> Result<(), TransitionError>
    where
        S: Send + Sync + 'static,
    {
        let snapshot = || Arc::clone(subject);
        let subject: &S = subject;
        self.decide(subject, goal, |guards| {
            self.evaluation.run(guards, subject, goal, snapshot)
        })
    }

    /// [`permitted`](Self::permitted) without worker threads.
    ///
    /// Guards run on the calling thread in registration order whatever the
    /// ruleset's [`Evaluation`], stopping at the first failure. Any subject
    /// type can be decided this way.
    pub fn permitted_inline(&self, subject: &S, goal: &State) -> Result<(), TransitionError> {
        self.decide(subject, goal, |guards| {
            evaluation::sequential(guards, subject, goal)
        })
    }

    fn decide<F>(&self, subject: &S, goal: &State, evaluate: F) -> Result<(), TransitionError>
    where
        F: FnOnce(&[Guard<S>]) -> Result<(), GuardError>,
    {
        // State clones share their label, so the key costs no allocation.
        let key = TransitionKey::new(subject.current_state(), goal);

        let Some(guards) = self.guards(&key) else {
            tracing::debug!(transition = %key, "invalid transition");
            return Err(TransitionError::InvalidTransition {
                from: key.origin,
                to: key.event,
            });
        };

        tracing::trace!(
            transition = %key,
            guards = guards.len(),
            evaluation = ?self.evaluation,
            "evaluating guards"
        );

        evaluate(guards).map_err(|source| {
            tracing::debug!(transition = %key, reason = %source, "transition denied");
            TransitionError::Denied {
                from: key.origin,
                to: key.event,
                source,
            }
        })
    }

    /// Run every guard of the transition and collect all denials.
    ///
    /// Unlike [`permitted`](Self::permitted) this never short-circuits; guards
    /// run on the calling thread in registration order.
    pub fn audit(&self, subject: &S, goal: &State) -> AuditResult {
        let from = subject.current_state();
        match self.transitions.get(&TransitionKey::new(from, goal)) {
            Some(guards) => audit::audit_guards(guards, subject, from, goal),
            None => audit::invalid(from, goal),
        }
    }
}

impl<S> Default for Ruleset<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Ruleset<S> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
            evaluation: self.evaluation,
        }
    }
}

impl<S> std::fmt::Debug for Ruleset<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ruleset")
            .field("transitions", &self.transitions)
            .field("evaluation", &self.evaluation)
            .finish()
    }
}

impl<S, K> FromIterator<K> for Ruleset<S>
where
    K: Into<TransitionKey>,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_transitions(iter)
    }
}

impl<S, K> Extend<K> for Ruleset<S>
where
    K: Into<TransitionKey>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add_transition(key);
        }
    }
}
