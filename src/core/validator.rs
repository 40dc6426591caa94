//! Validators that can veto a transition.
//!
//! A validator is a decision function over the `(from, to)` pair of a
//! transition. It runs after the before-hooks and before the state changes;
//! returning an error aborts the transition and that error reaches the caller
//! of `fire` unchanged.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Error produced by a caller-supplied validator.
///
/// Anything implementing `std::error::Error` works, and so does a plain
/// message via `"reason".into()`.
pub type ValidationError = Box<dyn std::error::Error + Send + Sync>;

type ValidateFn<S> = dyn Fn(&S, &S) -> Result<(), ValidationError> + Send + Sync;

/// Decision function deciding whether a transition may complete.
///
/// # Example
///
/// ```rust
/// use transit::core::Validator;
///
/// let only_forward = Validator::new(|from: &String, to: &String| {
///     if from < to {
///         Ok(())
///     } else {
///         Err(format!("cannot go back from {from} to {to}").into())
///     }
/// });
///
/// assert!(only_forward.check(&"a".to_string(), &"b".to_string()).is_ok());
/// assert!(only_forward.check(&"b".to_string(), &"a".to_string()).is_err());
/// ```
pub struct Validator<S: State> {
    decide: Arc<ValidateFn<S>>,
}

impl<S: State> Validator<S> {
    /// Create a validator from a decision function.
    pub fn new<F>(decide: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Validator {
            decide: Arc::new(decide),
        }
    }

    /// Run the decision for a transition from `from` to `to`.
    pub fn check(&self, from: &S, to: &S) -> Result<(), ValidationError> {
        (self.decide)(from, to)
    }
}

impl<S: State> Clone for Validator<S> {
    fn clone(&self) -> Self {
        Self {
            decide: Arc::clone(&self.decide),
        }
    }
}

impl<S: State> fmt::Debug for Validator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}
