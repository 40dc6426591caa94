//! Core state machine types.
//!
//! This module contains the building blocks the engine works with:
//! - State labels via the `State` trait
//! - Validators that can veto a transition
//! - Immutable transition history

mod history;
mod state;
mod validator;

pub use history::{History, TransitionRecord};
pub(crate) use state::format_states;
pub use state::State;
pub use validator::{ValidationError, Validator};
