//! Builder for constructing events.

use crate::builder::error::BuildError;
use crate::core::{State, ValidationError, Validator};
use crate::engine::{Event, Hook};
use std::sync::Arc;

/// Builder for constructing events with a fluent API.
pub struct EventBuilder<S: State> {
    name: String,
    from: Vec<S>,
    to: Option<S>,
    validate: Option<Validator<S>>,
    before: Option<Hook>,
    after: Option<Hook>,
}

impl<S: State> EventBuilder<S> {
    /// Start building an event called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: Vec::new(),
            to: None,
            validate: None,
            before: None,
            after: None,
        }
    }

    /// Add a permitted source state (at least one is required).
    pub fn from(mut self, state: S) -> Self {
        self.from.push(state);
        self
    }

    /// Add several permitted source states.
    pub fn from_any(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.from.extend(states);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a validator using a closure (optional).
    pub fn validate<F>(mut self, decide: F) -> Self
    where
        F: Fn(&S, &S) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validate = Some(Validator::new(decide));
        self
    }

    /// Add a prebuilt validator (optional).
    pub fn validator(mut self, validator: Validator<S>) -> Self {
        self.validate = Some(validator);
        self
    }

    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Build the event.
    pub fn build(self) -> Result<Event<S>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::MissingName);
        }
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Event {
            name: self.name,
            from: self.from,
            to,
            validate: self.validate,
            before: self.before,
            after: self.after,
        })
    }
}
