//! Transit: an event-driven finite state machine engine
//!
//! A machine is declared with a fixed set of states and an initial state,
//! then driven by named events. Each event moves the machine from one of its
//! permitted source states to a single target, optionally guarded by a
//! validator and wrapped in before/after hooks.
//!
//! # Core Concepts
//!
//! - **State**: Any equality-comparable label via the `State` trait (`String` works out of the box)
//! - **Event**: A named transition with source states, a target, a validator and hooks
//! - **Machine**: Enforces membership and legality, and runs the firing protocol
//! - **Definition**: Serializable description of a machine's structure
//!
//! # Example
//!
//! ```rust
//! use transit::{Event, Machine, MachineError, StateMachine};
//!
//! let states = vec!["locked".to_string(), "unlocked".to_string()];
//! let mut turnstile = Machine::new(states, "locked".to_string()).unwrap();
//!
//! turnstile
//!     .register_events(vec![
//!         Event::new("coin", vec!["locked".to_string()], "unlocked".to_string()),
//!         Event::new("push", vec!["unlocked".to_string()], "locked".to_string()),
//!     ])
//!     .unwrap();
//!
//! turnstile.fire("coin").unwrap();
//! assert_eq!(turnstile.current_state(), "unlocked");
//!
//! let err = turnstile.fire("coin").unwrap_err();
//! assert!(matches!(err, MachineError::IllegalTransition { .. }));
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;
pub mod render;

// Re-export commonly used types
pub use builder::{BuildError, EventBuilder, MachineBuilder};
pub use core::{History, State, TransitionRecord, ValidationError, Validator};
pub use definition::{DefinitionError, MachineDefinition};
pub use engine::{Event, Machine, MachineError, MachineResult, StateMachine};
