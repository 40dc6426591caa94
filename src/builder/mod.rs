//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for creating machines
//! with minimal boilerplate.

pub mod error;
pub mod event;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use event::EventBuilder;
pub use machine::MachineBuilder;

use crate::core::State;
use crate::engine::Event;

/// Create an unconditional event with a single source state.
///
/// # Example
///
/// ```
/// use transit::builder::event;
/// use transit::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// let go = event("go", Light::Red, Light::Green);
/// assert_eq!(go.name(), "go");
/// ```
pub fn event<S: State>(name: impl Into<String>, from: S, to: S) -> Event<S> {
    Event::new(name, vec![from], to)
}
