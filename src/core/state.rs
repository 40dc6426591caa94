//! Core State trait for state machine states.
//!
//! The engine treats states as opaque labels: it only compares them for
//! equality and set membership, and asks for a name when reporting.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into events, errors and history records
/// - `PartialEq`: Membership and transition legality are equality checks
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in machine definitions and history
///
/// `String` implements this trait directly, so plain string labels work
/// without any ceremony. Fieldless enums can use [`state_enum!`](crate::state_enum).
///
/// # Example
///
/// ```rust
/// use transit::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert_eq!("Locked".to_string().name(), "Locked");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Render a list of states the way error messages and tables show them: `[A B]`.
pub(crate) fn format_states<S: State>(states: &[S]) -> String {
    let names: Vec<&str> = states.iter().map(State::name).collect();
    format!("[{}]", names.join(" "))
}
