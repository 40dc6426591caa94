//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::engine::{Event, Machine, MachineResult, StateMachine};

type BoxedGlobalHook<S> = Box<dyn Fn(&str, &S, &S) + Send + Sync>;

/// Builder for constructing machines with a fluent API.
///
/// Events are registered one by one when `build` runs, so the first invalid
/// event is reported and the partially built machine is dropped.
pub struct MachineBuilder<S: State> {
    states: Vec<S>,
    initial: Option<S>,
    events: Vec<Event<S>>,
    before_all: Option<BoxedGlobalHook<S>>,
    after_all: Option<BoxedGlobalHook<S>>,
}

impl<S: State> MachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            events: Vec::new(),
            before_all: None,
            after_all: None,
        }
    }

    /// Declare all states at once, in order.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states);
        self
    }

    /// Declare one more state.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn event(mut self, event: Event<S>) -> Self {
        self.events.push(event);
        self
    }

    pub fn events(mut self, events: impl IntoIterator<Item = Event<S>>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn before_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
    {
        self.before_all = Some(Box::new(hook));
        self
    }

    pub fn after_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
    {
        self.after_all = Some(Box::new(hook));
        self
    }

    /// Build the machine, validating the initial state and every event.
    pub fn build(self) -> MachineResult<Machine<S>, S> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = Machine::new(self.states, initial)?;
        for event in self.events {
            machine.register_event(event)?;
        }

        if let Some(hook) = self.before_all {
            machine.before_all(hook);
        }
        if let Some(hook) = self.after_all {
            machine.after_all(hook);
        }

        Ok(machine)
    }
}

impl<S: State> Default for MachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
