//! Core value types of the transition guard.
//!
//! - `State` labels and the `Stater` capability of a subject
//! - `TransitionKey` identifying one edge of the transition graph
//! - `Guard` functions and the `GuardError` they report
//!
//! Nothing in this module schedules work or holds shared state.

mod guard;
mod state;
mod transition;

pub use guard::{Guard, GuardError, GuardFn};
pub use state::{State, Stater};
pub use transition::TransitionKey;
