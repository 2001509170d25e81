//! Guards that can veto a transition.
//!
//! A guard is a pure decision function over `(subject, goal)`. It approves
//! by returning `Ok(())` and vetoes by returning a [`GuardError`]. Guards run
//! concurrently with each other, so they must not mutate the subject or rely
//! on evaluation order.

use super::state::State;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Reason a guard rejected a transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// The guard's policy forbids the transition.
    #[error("{reason}")]
    Denied { reason: String },

    /// The guard did not produce a decision (it panicked, or its worker was
    /// lost). Treated as a denial.
    #[error("guard faulted: {message}")]
    Faulted { message: String },
}

impl GuardError {
    /// Shorthand for a policy denial.
    pub fn denied(reason: impl Into<String>) -> Self {
        GuardError::Denied {
            reason: reason.into(),
        }
    }

    /// Shorthand for a guard that produced no decision.
    pub fn faulted(message: impl Into<String>) -> Self {
        GuardError::Faulted {
            message: message.into(),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, GuardError::Faulted { .. })
    }
}

/// Signature every guard function satisfies.
pub type GuardFn<S> = dyn Fn(&S, &State) -> Result<(), GuardError> + Send + Sync;

/// Policy function that can veto a specific transition for a specific subject.
///
/// Guards are cheap to clone; clones share the same function.
///
/// # Example
///
/// ```rust
/// use fsm_guard::core::{Guard, GuardError, State};
///
/// struct Invoice {
///     paid: bool,
/// }
///
/// let must_be_paid = Guard::named("paid", |invoice: &Invoice, _goal: &State| {
///     if invoice.paid {
///         Ok(())
///     } else {
///         Err(GuardError::denied("invoice is unpaid"))
///     }
/// });
///
/// let goal = State::from("shipped");
/// assert!(must_be_paid.check(&Invoice { paid: true }, &goal).is_ok());
/// assert_eq!(
///     must_be_paid.check(&Invoice { paid: false }, &goal),
///     Err(GuardError::denied("invoice is unpaid"))
/// );
/// ```
pub struct Guard<S> {
    label: Option<Arc<str>>,
    check: Arc<GuardFn<S>>,
}

impl<S> Guard<S> {
    /// Create an unlabeled guard from a decision function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&S, &State) -> Result<(), GuardError> + Send + Sync + 'static,
    {
        Guard {
            label: None,
            check: Arc::new(check),
        }
    }

    /// Create a guard carrying a label for diagnostics.
    pub fn named<F>(label: impl Into<Arc<str>>, check: F) -> Self
    where
        F: Fn(&S, &State) -> Result<(), GuardError> + Send + Sync + 'static,
    {
        Guard {
            label: Some(label.into()),
            check: Arc::new(check),
        }
    }

    /// Create a guard from a boolean predicate; `false` denies with `reason`.
    ///
    /// ```rust
    /// use fsm_guard::core::{Guard, GuardError, State};
    ///
    /// let not_archived = Guard::require(
    ///     |archived: &bool, _goal: &State| !*archived,
    ///     "subject is archived",
    /// );
    ///
    /// let goal = State::from("open");
    /// assert!(not_archived.check(&false, &goal).is_ok());
    /// assert_eq!(
    ///     not_archived.check(&true, &goal),
    ///     Err(GuardError::denied("subject is archived"))
    /// );
    /// ```
    pub fn require<F>(predicate: F, reason: impl Into<String>) -> Self
    where
        F: Fn(&S, &State) -> bool + Send + Sync + 'static,
    {
        let reason = reason.into();
        Guard::new(move |subject, goal| {
            if predicate(subject, goal) {
                Ok(())
            } else {
                Err(GuardError::denied(reason.clone()))
            }
        })
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Evaluate the guard.
    ///
    /// A panic inside the guard is caught and reported as
    /// [`GuardError::Faulted`], so a decision is always returned. The
    /// process panic hook still runs first; with the default hook every
    /// panicking guard prints a `thread '...' panicked at` line to stderr.
    /// Install a hook with [`std::panic::set_hook`] to route or silence it.
    ///
    /// ```rust
    /// use fsm_guard::core::{Guard, GuardError, State};
    ///
    /// std::panic::set_hook(Box::new(|_| {}));
    ///
    /// let flaky = Guard::new(|_: &(), _: &State| -> Result<(), GuardError> {
    ///     panic!("rates service down")
    /// });
    ///
    /// assert_eq!(
    ///     flaky.check(&(), &State::from("priced")),
    ///     Err(GuardError::faulted("rates service down"))
    /// );
    /// # let _ = std::panic::take_hook();
    /// ```
    pub fn check(&self, subject: &S, goal: &State) -> Result<(), GuardError> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.check)(subject, goal))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(
                    guard = self.label().unwrap_or("<unnamed>"),
                    %goal,
                    %message,
                    "guard panicked"
                );
                Err(GuardError::faulted(message))
            }
        }
    }
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Guard {
            label: self.label.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<S> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
