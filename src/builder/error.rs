//! Build errors for machine and event builders.

use thiserror::Error;

/// Errors that can occur when building machines and events.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Event name not specified. Pass a non-empty name to EventBuilder::new")]
    MissingName,

    #[error("Event source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Event target state not specified. Call .to(state)")]
    MissingToState,
}
