//! Error taxonomy for the transition engine.

use crate::builder::BuildError;
use crate::core::{format_states, State, ValidationError};
use thiserror::Error;

/// Result type alias for engine operations
pub type MachineResult<T, S> = std::result::Result<T, MachineError<S>>;

/// Errors returned by machine construction, registration and firing.
///
/// Every variant carries the offending name or state so callers can match on
/// the kind and still produce a useful message.
#[derive(Debug, Error)]
pub enum MachineError<S: State> {
    #[error("initial state {} must be one of: {}", .state.name(), format_states(.states))]
    InvalidInitialState { state: S, states: Vec<S> },

    #[error("to state {} of the {event} event must be one of: {}", .state.name(), format_states(.states))]
    InvalidTargetState {
        event: String,
        state: S,
        states: Vec<S>,
    },

    #[error("from state {} of the {event} event must be one of: {}", .state.name(), format_states(.states))]
    InvalidSourceState {
        event: String,
        state: S,
        states: Vec<S>,
    },

    #[error("from and to states of the {event} event cannot be the same ({})", .state.name())]
    SelfTransitionNotAllowed { event: String, state: S },

    #[error("event name {event} must be unique")]
    DuplicateEventName { event: String },

    #[error("{event} event is not registered")]
    EventNotRegistered { event: String },

    #[error("cannot fire the {event} event from the {} state", .state.name())]
    IllegalTransition {
        event: String,
        state: S,
        permitted: Vec<S>,
    },

    #[error("state {} must be one of: {}", .state.name(), format_states(.states))]
    InvalidState { state: S, states: Vec<S> },

    /// A validator vetoed the transition. Display and source are the
    /// validator's own.
    #[error(transparent)]
    Rejected(ValidationError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl<S: State> MachineError<S> {
    /// The validator's error when this is a rejection.
    pub fn rejection(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Rejected(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
