//! Builder for constructing machines.

use super::error::BuildError;
use super::Machine;
use crate::ruleset::Ruleset;
use std::sync::Arc;

/// Builder for binding a ruleset to a subject with a fluent API.
pub struct MachineBuilder<'a, S> {
    rules: Option<Arc<Ruleset<S>>>,
    subject: Option<&'a mut S>,
}

impl<'a, S> MachineBuilder<'a, S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            rules: None,
            subject: None,
        }
    }

    /// Set the ruleset (required). Accepts an owned `Ruleset` or a shared
    /// `Arc<Ruleset>`.
    pub fn rules(mut self, rules: impl Into<Arc<Ruleset<S>>>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Set the subject whose state the machine drives (required).
    pub fn subject(mut self, subject: &'a mut S) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Machine<'a, S>, BuildError> {
        let rules = self.rules.ok_or(BuildError::MissingRules)?;
        let subject = self.subject.ok_or(BuildError::MissingSubject)?;

        Ok(Machine::new(rules, subject))
    }
}

impl<S> Default for MachineBuilder<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}
