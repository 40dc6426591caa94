//! Declarative machine definitions.
//!
//! A definition describes a machine's structure (states, initial state and
//! events) as plain data, so it can live in a JSON file next to the code that
//! attaches hooks and validators.
//!
//! Checking a definition uses Stillwater's `Validation` to report every
//! problem at once instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use transit::definition::MachineDefinition;
//! use transit::StateMachine;
//!
//! let json = r#"{
//!     "states": ["draft", "review", "published"],
//!     "initial": "draft",
//!     "events": [
//!         { "name": "submit", "from": ["draft"], "to": "review" },
//!         { "name": "approve", "from": ["review"], "to": "published" }
//!     ]
//! }"#;
//!
//! let definition: MachineDefinition<String> = MachineDefinition::from_json(json).unwrap();
//! let mut machine = definition.build().unwrap();
//!
//! machine.fire("submit").unwrap();
//! assert_eq!(machine.current_state(), "review");
//! ```

pub mod violations;

pub use violations::{DefinitionError, Violation};

use crate::core::State;
use crate::engine::{Event, Machine, StateMachine};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<Violation>>;

/// Structure of one event: no hooks, no validator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EventDefinition<S: State> {
    pub name: String,
    pub from: Vec<S>,
    pub to: S,
}

/// Structure of a whole machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<S: State> {
    pub states: Vec<S>,
    pub initial: S,
    #[serde(default)]
    pub events: Vec<EventDefinition<S>>,
}

impl<S: State> MachineDefinition<S> {
    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError<S>> {
        serde_json::from_str(json).map_err(|e| DefinitionError::ParseFailed(e.to_string()))
    }

    /// Serialize the definition as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, DefinitionError<S>> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    /// Check the definition, accumulating ALL violations.
    pub fn check(&self) -> Validation<(), NonEmptyVec<Violation>> {
        let mut checks: Vec<Check> = Vec::new();

        checks.push(if self.states.contains(&self.initial) {
            Validation::success(())
        } else {
            Validation::fail(Violation::UnknownInitialState {
                state: self.initial.name().to_string(),
            })
        });

        let mut seen: Vec<&str> = Vec::new();
        for event in &self.events {
            checks.extend(self.check_event(event));

            if seen.contains(&event.name.as_str()) {
                checks.push(Validation::fail(Violation::DuplicateEventName {
                    event: event.name.clone(),
                }));
            } else {
                seen.push(&event.name);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_event(&self, event: &EventDefinition<S>) -> Vec<Check> {
        let mut checks: Vec<Check> = Vec::new();

        if !self.states.contains(&event.to) {
            checks.push(Validation::fail(Violation::UnknownTargetState {
                event: event.name.clone(),
                state: event.to.name().to_string(),
            }));
        }

        if event.from.is_empty() {
            checks.push(Validation::fail(Violation::EmptySourceSet {
                event: event.name.clone(),
            }));
        }

        for source in event.from.iter().filter(|s| !self.states.contains(s)) {
            checks.push(Validation::fail(Violation::UnknownSourceState {
                event: event.name.clone(),
                state: source.name().to_string(),
            }));
        }

        if event.from.contains(&event.to) {
            checks.push(Validation::fail(Violation::SelfTransition {
                event: event.name.clone(),
                state: event.to.name().to_string(),
            }));
        }

        checks
    }

    /// Every violation in the definition, empty when it is consistent.
    pub fn violations(&self) -> Vec<Violation> {
        match self.check() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    /// Build a machine from the definition.
    ///
    /// The definition is checked first; any violation fails the build with
    /// the complete list. Engine errors are returned as
    /// [`DefinitionError::Machine`].
    pub fn build(self) -> Result<Machine<S>, DefinitionError<S>> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(DefinitionError::Invalid { violations });
        }

        let mut machine = Machine::new(self.states, self.initial)?;
        for event in self.events {
            machine.register_event(Event::new(event.name, event.from, event.to))?;
        }

        tracing::debug!(
            states = machine.states().len(),
            events = machine.events().len(),
            "machine built from definition"
        );
        Ok(machine)
    }
}

impl<S: State> Machine<S> {
    /// Export the machine's structure. Hooks and validators are left out.
    pub fn definition(&self) -> MachineDefinition<S> {
        MachineDefinition {
            states: self.states().to_vec(),
            initial: self.initial_state().clone(),
            events: self
                .events()
                .iter()
                .map(|e| EventDefinition {
                    name: e.name().to_string(),
                    from: e.from().to_vec(),
                    to: e.to().clone(),
                })
                .collect(),
        }
    }
}
