//! Named transition descriptors.

use crate::core::{State, ValidationError, Validator};
use std::fmt;
use std::sync::Arc;

/// Side-effecting hook run around a single event's state change.
pub type Hook = Arc<dyn Fn() + Send + Sync>;

/// Global hook run around every transition, receiving `(event, from, to)`.
pub type GlobalHook<S> = Arc<dyn Fn(&str, &S, &S) + Send + Sync>;

/// A named transition from any of a set of source states to one target.
///
/// # Example
///
/// ```rust
/// use transit::Event;
///
/// let publish = Event::new("publish", vec!["draft".to_string()], "published".to_string())
///     .before(|| println!("publishing"))
///     .validate(|_from: &String, _to: &String| Ok(()));
///
/// assert_eq!(publish.name(), "publish");
/// assert!(publish.can_fire_from(&"draft".to_string()));
/// ```
pub struct Event<S: State> {
    pub(crate) name: String,
    pub(crate) from: Vec<S>,
    pub(crate) to: S,
    pub(crate) validate: Option<Validator<S>>,
    pub(crate) before: Option<Hook>,
    pub(crate) after: Option<Hook>,
}

impl<S: State> Event<S> {
    /// Create an event with no validator and no hooks.
    pub fn new(name: impl Into<String>, from: Vec<S>, to: S) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            validate: None,
            before: None,
            after: None,
        }
    }

    /// Attach a validator that may veto the transition.
    pub fn validate<F>(mut self, decide: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validate = Some(Validator::new(decide));
        self
    }

    /// Attach a prebuilt validator.
    pub fn validator(mut self, validator: Validator<S>) -> Self {
        self.validate = Some(validator);
        self
    }

    /// Hook run before validation.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Hook run right after the state changes.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permitted source states, in declaration order.
    pub fn from(&self) -> &[S] {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn has_validator(&self) -> bool {
        self.validate.is_some()
    }

    /// Check whether `current` is one of the permitted source states (pure).
    pub fn can_fire_from(&self, current: &S) -> bool {
        self.from.contains(current)
    }
}

impl<S: State> Clone for Event<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            validate: self.validate.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<S: State> fmt::Debug for Event<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("validate", &self.validate.is_some())
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}
