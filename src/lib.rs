//! fsm-guard: transition guards for finite state machines
//!
//! A subject carries a current [`State`]. A [`Ruleset`] records which
//! transitions exist and which guards may veto each of them. Asking whether
//! a transition is permitted is a table lookup followed by running the
//! transition's guards concurrently; the first guard to fail decides the
//! outcome, otherwise the transition is approved once every guard agrees.
//! A [`Machine`] binds a ruleset to one subject and writes the goal state
//! only after approval.
//!
//! # Core Concepts
//!
//! - **State**: opaque label; validity comes only from registered transitions
//! - **TransitionKey**: `(origin, event)` pair identifying one edge
//! - **Guard**: pure function of `(subject, goal)` that approves or denies
//! - **Ruleset**: the transition table and decision engine
//! - **Machine**: applies approved transitions to a caller-owned subject
//!
//! # Example
//!
//! ```rust
//! use fsm_guard::core::{GuardError, State};
//! use fsm_guard::{stater, Machine, Ruleset, TransitionError};
//!
//! #[derive(Clone)]
//! struct Thing {
//!     state: State,
//!     approved: bool,
//! }
//! stater!(Thing, state);
//!
//! let mut rules = Ruleset::from_transitions([("pending", "started"), ("started", "finished")]);
//! rules.add_rule(("started", "finished"), |thing: &Thing, _goal: &State| {
//!     if thing.approved {
//!         Ok(())
//!     } else {
//!         Err(GuardError::denied("awaiting approval"))
//!     }
//! });
//!
//! let mut thing = Thing { state: State::from("pending"), approved: false };
//! let mut machine = Machine::new(rules, &mut thing);
//!
//! machine.transition("started").unwrap();
//! let err = machine.transition("finished").unwrap_err();
//! assert!(matches!(err, TransitionError::Denied { .. }));
//! assert_eq!(machine.current_state(), "started");
//! ```

#[macro_use]
mod macros;

pub mod core;
pub mod machine;
pub mod ruleset;

// Re-export commonly used types
pub use crate::core::{Guard, GuardError, State, Stater, TransitionKey};
pub use machine::{BuildError, Machine, MachineBuilder};
pub use ruleset::{AuditResult, Evaluation, Ruleset, TransitionError};
