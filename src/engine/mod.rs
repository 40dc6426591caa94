//! The transition engine.
//!
//! Owns the state set, the current state, the registered events and the two
//! global hooks. Firing an event follows a fixed protocol:
//!
//! 1. look the event up, fail if it is not registered
//! 2. check the current state is one of the event's sources
//! 3. run the global before-hook, then the event's before-hook
//! 4. run the validator; an error aborts here with the state untouched
//! 5. move to the target state
//! 6. run the event's after-hook, then the global after-hook
//!
//! Hooks are plain callbacks. A panicking hook is not caught.

mod error;
mod event;
mod machine;

pub use error::{MachineError, MachineResult};
pub use event::{Event, GlobalHook, Hook};
pub use machine::{Machine, StateMachine};
