//! Machine construction errors.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Ruleset not specified. Call .rules(ruleset) before .build()")]
    MissingRules,

    #[error("Subject not specified. Call .subject(&mut subject) before .build()")]
    MissingSubject,
}
