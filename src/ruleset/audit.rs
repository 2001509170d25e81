//! Collect-all evaluation of a transition's guards.
//!
//! `Ruleset::permitted` stops at the first failure. When a caller wants to
//! present every reason a transition is blocked, `Ruleset::audit` runs all
//! guards and accumulates their denials in a `Validation`.

use super::error::TransitionError;
use crate::core::{Guard, State};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of an audit: success, or every reason the transition is blocked.
pub type AuditResult = Validation<(), NonEmptyVec<TransitionError>>;

pub(crate) fn audit_guards<S>(
    guards: &[Guard<S>],
    subject: &S,
    from: &State,
    to: &State,
) -> AuditResult {
    let checks: Vec<AuditResult> = guards
        .iter()
        .map(|guard| match guard.check(subject, to) {
            Ok(()) => Validation::success(()),
            Err(source) => Validation::fail(TransitionError::Denied {
                from: from.clone(),
                to: to.clone(),
                source,
            }),
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

pub(crate) fn invalid(from: &State, to: &State) -> AuditResult {
    Validation::fail(TransitionError::InvalidTransition {
        from: from.clone(),
        to: to.clone(),
    })
}
