//! Definition violations and errors.

use crate::core::State;
use crate::engine::MachineError;
use thiserror::Error;

/// A single problem found while checking a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("Initial state '{state}' is not a declared state")]
    UnknownInitialState { state: String },

    #[error("Event '{event}' targets undeclared state '{state}'")]
    UnknownTargetState { event: String, state: String },

    #[error("Event '{event}' starts from undeclared state '{state}'")]
    UnknownSourceState { event: String, state: String },

    #[error("Event '{event}' has no source states")]
    EmptySourceSet { event: String },

    #[error("Event '{event}' both starts from and targets '{state}'")]
    SelfTransition { event: String, state: String },

    #[error("Event name '{event}' is declared more than once")]
    DuplicateEventName { event: String },
}

/// Errors from loading, checking or building a definition.
#[derive(Debug, Error)]
pub enum DefinitionError<S: State> {
    /// Parsing from JSON failed
    #[error("Definition parsing failed: {0}")]
    ParseFailed(String),

    /// Serialization to JSON failed
    #[error("Definition serialization failed: {0}")]
    SerializationFailed(String),

    /// The definition is well-formed but inconsistent
    #[error("Definition has {} violation(s): {}", .violations.len(), join(.violations))]
    Invalid { violations: Vec<Violation> },

    /// The engine refused the definition while building
    #[error(transparent)]
    Machine(#[from] MachineError<S>),
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
