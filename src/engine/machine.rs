//! The transition engine.

use crate::core::{History, State, TransitionRecord};
use crate::engine::error::{MachineError, MachineResult};
use crate::engine::event::{Event, GlobalHook};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Operations every state machine exposes.
///
/// [`Machine`] is the implementation shipped with this crate; the trait keeps
/// callers and renderers independent of it.
pub trait StateMachine<S: State> {
    /// The present state. No side effects.
    fn current_state(&self) -> &S;

    /// Fire a registered event, running validators and hooks.
    fn fire(&mut self, event: &str) -> MachineResult<(), S>;

    /// Register one event after checking it against the machine's states.
    fn register_event(&mut self, event: Event<S>) -> MachineResult<(), S>;

    /// Register a batch of events. Any invalid event empties the whole
    /// event collection, including events registered by earlier calls.
    fn register_events(&mut self, events: Vec<Event<S>>) -> MachineResult<(), S>;

    /// Set the hook run before every transition. Replaces any previous one.
    ///
    /// The hook receives the event name, the current state and the target.
    fn before_all<F>(&mut self, hook: F)
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
        Self: Sized;

    /// Set the hook run after every transition. Replaces any previous one.
    fn after_all<F>(&mut self, hook: F)
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
        Self: Sized;

    /// Move to `state` without running validators or hooks.
    fn set_current_state(&mut self, state: S) -> MachineResult<(), S>;

    /// Registered events in registration order.
    fn events(&self) -> &[Event<S>];

    /// The fixed set of states, in declaration order.
    fn states(&self) -> &[S];

    fn initial_state(&self) -> &S;
}

/// In-memory finite state machine driven by named events.
///
/// # Example
///
/// ```rust
/// use transit::{Event, Machine, StateMachine};
///
/// let states = vec!["A".to_string(), "B".to_string()];
/// let mut machine = Machine::new(states, "A".to_string()).unwrap();
///
/// machine
///     .register_event(Event::new("go", vec!["A".to_string()], "B".to_string()))
///     .unwrap();
/// machine.fire("go").unwrap();
///
/// assert_eq!(machine.current_state(), "B");
/// ```
pub struct Machine<S: State> {
    states: Vec<S>,
    initial: S,
    current: S,
    events: Vec<Event<S>>,
    before_all: Option<GlobalHook<S>>,
    after_all: Option<GlobalHook<S>>,
    history: History<S>,
}

impl<S: State> Machine<S> {
    /// Create a machine in `initial`, which must be one of `states`.
    pub fn new(states: Vec<S>, initial: S) -> MachineResult<Self, S> {
        if !states.contains(&initial) {
            return Err(MachineError::InvalidInitialState {
                state: initial,
                states,
            });
        }

        Ok(Self {
            current: initial.clone(),
            initial,
            states,
            events: Vec::new(),
            before_all: None,
            after_all: None,
            history: History::new(),
        })
    }

    /// Completed transitions, oldest first.
    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// Look up a registered event by name.
    pub fn event(&self, name: &str) -> Option<&Event<S>> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Whether `name` is registered and permitted from the current state.
    ///
    /// Validators are not consulted.
    pub fn can_fire(&self, name: &str) -> bool {
        self.event(name)
            .is_some_and(|e| e.can_fire_from(&self.current))
    }

    /// Names of the events permitted from the current state, in registration order.
    pub fn available_events(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.can_fire_from(&self.current))
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Retain only the newest `limit` transitions in the history.
    ///
    /// Records already held beyond the limit are dropped, oldest first.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        let mut history = History::with_limit(limit);
        for record in self.history.transitions().cloned() {
            history.push(record);
        }
        self.history = history;
        self
    }

    /// Forget every recorded transition. The current state is unaffected.
    pub fn clear_history(&mut self) {
        tracing::debug!(cleared = self.history.len(), "history cleared");
        self.history.clear();
    }

    fn is_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    // First failing check wins; nothing is mutated here.
    fn check_event(&self, event: &Event<S>) -> MachineResult<(), S> {
        if !self.is_state(&event.to) {
            return Err(MachineError::InvalidTargetState {
                event: event.name.clone(),
                state: event.to.clone(),
                states: self.states.clone(),
            });
        }

        if let Some(unknown) = event.from.iter().find(|s| !self.is_state(s)) {
            return Err(MachineError::InvalidSourceState {
                event: event.name.clone(),
                state: unknown.clone(),
                states: self.states.clone(),
            });
        }

        if event.from.contains(&event.to) {
            return Err(MachineError::SelfTransitionNotAllowed {
                event: event.name.clone(),
                state: event.to.clone(),
            });
        }

        if self.event(&event.name).is_some() {
            return Err(MachineError::DuplicateEventName {
                event: event.name.clone(),
            });
        }

        Ok(())
    }
}

impl<S: State> StateMachine<S> for Machine<S> {
    fn current_state(&self) -> &S {
        &self.current
    }

    fn fire(&mut self, name: &str) -> MachineResult<(), S> {
        let Some(event) = self.events.iter().find(|e| e.name == name) else {
            return Err(MachineError::EventNotRegistered {
                event: name.to_string(),
            });
        };

        if !event.can_fire_from(&self.current) {
            return Err(MachineError::IllegalTransition {
                event: event.name.clone(),
                state: self.current.clone(),
                permitted: event.from.clone(),
            });
        }

        let from = self.current.clone();

        if let Some(hook) = &self.before_all {
            tracing::trace!(event = %event.name, "running before-all hook");
            hook(event.name.as_str(), &from, &event.to);
        }

        if let Some(hook) = &event.before {
            tracing::trace!(event = %event.name, "running before hook");
            hook();
        }

        if let Some(validator) = &event.validate {
            if let Err(err) = validator.check(&from, &event.to) {
                tracing::debug!(
                    event = %event.name,
                    from = %from.name(),
                    to = %event.to.name(),
                    reason = %err,
                    "transition rejected by validator"
                );
                return Err(MachineError::Rejected(err));
            }
        }

        self.current = event.to.clone();

        if let Some(hook) = &event.after {
            tracing::trace!(event = %event.name, "running after hook");
            hook();
        }

        if let Some(hook) = &self.after_all {
            tracing::trace!(event = %event.name, "running after-all hook");
            hook(event.name.as_str(), &self.current, &event.to);
        }

        tracing::debug!(
            event = %event.name,
            from = %from.name(),
            to = %event.to.name(),
            "transition complete"
        );

        self.history.push(TransitionRecord {
            event: event.name.clone(),
            from,
            to: event.to.clone(),
            timestamp: Utc::now(),
        });

        Ok(())
    }

    fn register_event(&mut self, event: Event<S>) -> MachineResult<(), S> {
        self.check_event(&event)?;

        tracing::debug!(
            event = %event.name,
            to = %event.to.name(),
            sources = event.from.len(),
            "event registered"
        );
        self.events.push(event);
        Ok(())
    }

    fn register_events(&mut self, events: Vec<Event<S>>) -> MachineResult<(), S> {
        for event in events {
            if let Err(err) = self.register_event(event) {
                tracing::warn!(
                    cleared = self.events.len(),
                    error = %err,
                    "invalid event in batch, clearing all registered events"
                );
                self.events.clear();
                return Err(err);
            }
        }
        Ok(())
    }

    fn before_all<F>(&mut self, hook: F)
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
    {
        self.before_all = Some(Arc::new(hook));
    }

    fn after_all<F>(&mut self, hook: F)
    where
        F: Fn(&str, &S, &S) + Send + Sync + 'static,
    {
        self.after_all = Some(Arc::new(hook));
    }

    fn set_current_state(&mut self, state: S) -> MachineResult<(), S> {
        if !self.is_state(&state) {
            return Err(MachineError::InvalidState {
                state,
                states: self.states.clone(),
            });
        }

        tracing::debug!(
            from = %self.current.name(),
            to = %state.name(),
            "current state overridden"
        );
        self.current = state;
        Ok(())
    }

    fn events(&self) -> &[Event<S>] {
        &self.events
    }

    fn states(&self) -> &[S] {
        &self.states
    }

    fn initial_state(&self) -> &S {
        &self.initial
    }
}

impl<S: State> fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("current", &self.current)
            .field("events", &self.events)
            .field("before_all", &self.before_all.is_some())
            .field("after_all", &self.after_all.is_some())
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn states(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn machine() -> Machine<String> {
        Machine::new(states(&["A", "B"]), s("A")).unwrap()
    }

    fn go() -> Event<String> {
        Event::new("go", vec![s("A")], s("B"))
    }

    #[test]
    fn new_rejects_unknown_initial_state() {
        let result = Machine::new(states(&["A", "B"]), s("C"));

        match result {
            Err(MachineError::InvalidInitialState { state, states }) => {
                assert_eq!(state, "C");
                assert_eq!(states, vec![s("A"), s("B")]);
            }
            other => panic!("expected InvalidInitialState, got {other:?}"),
        }
    }

    #[test]
    fn new_machine_starts_in_initial_state() {
        let machine = machine();

        assert_eq!(machine.current_state(), "A");
        assert_eq!(machine.initial_state(), "A");
        assert_eq!(machine.states(), &[s("A"), s("B")]);
        assert!(machine.events().is_empty());
        assert!(machine.before_all.is_none());
        assert!(machine.after_all.is_none());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn register_event_appends_in_order() {
        let mut machine = machine();
        machine.register_event(go()).unwrap();
        machine
            .register_event(Event::new("back", vec![s("B")], s("A")))
            .unwrap();

        let names: Vec<&str> = machine.events().iter().map(Event::name).collect();
        assert_eq!(names, vec!["go", "back"]);
    }

    #[test]
    fn register_event_rejects_unknown_target() {
        let mut machine = machine();
        let err = machine
            .register_event(Event::new("go", vec![s("A")], s("C")))
            .unwrap_err();

        assert!(matches!(err, MachineError::InvalidTargetState { ref state, .. } if state == "C"));
        assert!(machine.events().is_empty());
    }

    #[test]
    fn register_event_rejects_unknown_source() {
        let mut machine = machine();
        let err = machine
            .register_event(Event::new("go", vec![s("A"), s("C")], s("B")))
            .unwrap_err();

        assert!(matches!(err, MachineError::InvalidSourceState { ref state, .. } if state == "C"));
        assert!(machine.events().is_empty());
    }

    #[test]
    fn register_event_rejects_self_transition() {
        let mut machine = machine();
        let err = machine
            .register_event(Event::new("stay", vec![s("A")], s("A")))
            .unwrap_err();

        assert!(matches!(err, MachineError::SelfTransitionNotAllowed { .. }));
        assert!(machine.events().is_empty());
    }

    #[test]
    fn register_event_checks_target_before_sources() {
        let mut machine = machine();
        let err = machine
            .register_event(Event::new("go", vec![s("X")], s("Y")))
            .unwrap_err();

        assert!(matches!(err, MachineError::InvalidTargetState { .. }));
    }

    #[test]
    fn register_event_rejects_duplicate_name() {
        let mut machine = machine();
        machine.register_event(go()).unwrap();

        let err = machine.register_event(go()).unwrap_err();

        assert!(matches!(err, MachineError::DuplicateEventName { ref event } if event == "go"));
        assert_eq!(machine.events().len(), 1);
    }

    #[test]
    fn register_events_adds_whole_batch() {
        let mut machine = machine();
        machine
            .register_events(vec![go(), Event::new("back", vec![s("B")], s("A"))])
            .unwrap();

        assert_eq!(machine.events().len(), 2);
        assert_eq!(machine.events()[0].name(), "go");
        assert_eq!(machine.events()[1].name(), "back");
    }

    #[test]
    fn register_events_failure_clears_everything() {
        let mut machine = machine();
        machine
            .register_event(Event::new("earlier", vec![s("B")], s("A")))
            .unwrap();

        let err = machine
            .register_events(vec![go(), Event::new("bad", vec![s("C")], s("A"))])
            .unwrap_err();

        assert!(matches!(err, MachineError::InvalidSourceState { .. }));
        assert!(machine.events().is_empty());
    }

    #[test]
    fn register_events_returns_first_error() {
        let mut machine = machine();
        let err = machine
            .register_events(vec![
                Event::new("bad-target", vec![s("A")], s("Z")),
                Event::new("bad-source", vec![s("Z")], s("A")),
            ])
            .unwrap_err();

        assert!(matches!(err, MachineError::InvalidTargetState { .. }));
    }

    #[test]
    fn fire_unknown_event_fails() {
        let mut machine = machine();
        let err = machine.fire("go").unwrap_err();

        assert_eq!(err.to_string(), "go event is not registered");
        assert_eq!(machine.current_state(), "A");
    }

    #[test]
    fn fire_from_wrong_state_fails() {
        let mut machine = machine();
        machine
            .register_event(Event::new("test1", vec![s("B")], s("A")))
            .unwrap();

        let err = machine.fire("test1").unwrap_err();

        assert_eq!(err.to_string(), "cannot fire the test1 event from the A state");
        match err {
            MachineError::IllegalTransition { permitted, .. } => assert_eq!(permitted, vec![s("B")]),
            other => panic!("expected IllegalTransition, got {other:?}"),
        }
        assert_eq!(machine.current_state(), "A");
    }

    #[test]
    fn fire_moves_to_target_and_records_history() {
        let mut machine = machine();
        machine.register_event(go()).unwrap();

        machine.fire("go").unwrap();

        assert_eq!(machine.current_state(), "B");
        let record = machine.history().last().unwrap();
        assert_eq!(record.event, "go");
        assert_eq!(record.from, "A");
        assert_eq!(record.to, "B");
    }

    #[test]
    fn rejected_transition_runs_before_hooks_only() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = machine();

        let before_all_log = Arc::clone(&log);
        let after_all_log = Arc::clone(&log);
        machine.before_all(move |_, _, _| before_all_log.lock().unwrap().push("beforeAll"));
        machine.after_all(move |_, _, _| after_all_log.lock().unwrap().push("afterAll"));

        let before_log = Arc::clone(&log);
        let after_log = Arc::clone(&log);
        machine
            .register_event(
                go().before(move || before_log.lock().unwrap().push("before"))
                    .validate(|_, _| Err("test1 event is not allowed".into()))
                    .after(move || after_log.lock().unwrap().push("after")),
            )
            .unwrap();

        let err = machine.fire("go").unwrap_err();

        assert_eq!(err.to_string(), "test1 event is not allowed");
        assert!(err.rejection().is_some());
        assert_eq!(machine.current_state(), "A");
        assert_eq!(*log.lock().unwrap(), vec!["beforeAll", "before"]);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn hooks_run_in_protocol_order() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let mut machine = machine();

        let l = Arc::clone(&log);
        machine.before_all(move |event, from, to| {
            l.lock().unwrap().push(format!("beforeAll {event} {from} {to}"));
        });
        let l = Arc::clone(&log);
        machine.after_all(move |event, from, to| {
            l.lock().unwrap().push(format!("afterAll {event} {from} {to}"));
        });

        let (lb, lv, la) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
        machine
            .register_event(
                go().before(move || lb.lock().unwrap().push("before".to_string()))
                    .validate(move |from, to| {
                        lv.lock().unwrap().push(format!("validate {from} {to}"));
                        Ok(())
                    })
                    .after(move || la.lock().unwrap().push("after".to_string())),
            )
            .unwrap();

        machine.fire("go").unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "beforeAll go A B",
                "before",
                "validate A B",
                "after",
                "afterAll go B B",
            ]
        );
    }

    #[test]
    fn global_hooks_are_last_write_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = machine();
        machine.register_event(go()).unwrap();

        let first = Arc::clone(&log);
        machine.before_all(move |_, _, _| first.lock().unwrap().push("first"));
        let second = Arc::clone(&log);
        machine.before_all(move |_, _, _| second.lock().unwrap().push("second"));

        machine.fire("go").unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn illegal_transition_runs_no_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = machine();
        let l = Arc::clone(&log);
        machine.before_all(move |_, _, _| l.lock().unwrap().push("beforeAll"));
        machine
            .register_event(Event::new("back", vec![s("B")], s("A")))
            .unwrap();

        assert!(machine.fire("back").is_err());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn set_current_state_bypasses_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut machine = machine();
        let l = Arc::clone(&log);
        machine.before_all(move |_, _, _| l.lock().unwrap().push("beforeAll"));

        machine.set_current_state(s("B")).unwrap();

        assert_eq!(machine.current_state(), "B");
        assert!(log.lock().unwrap().is_empty());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn set_current_state_rejects_unknown_state() {
        let mut machine = machine();
        let err = machine.set_current_state(s("C")).unwrap_err();

        assert!(matches!(err, MachineError::InvalidState { ref state, .. } if state == "C"));
        assert_eq!(err.to_string(), "state C must be one of: [A B]");
        assert_eq!(machine.current_state(), "A");
    }

    #[test]
    fn available_events_follow_current_state() {
        let mut machine = Machine::new(states(&["A", "B", "C"]), s("A")).unwrap();
        machine
            .register_events(vec![
                Event::new("ab", vec![s("A")], s("B")),
                Event::new("bc", vec![s("B")], s("C")),
                Event::new("reset", vec![s("B"), s("C")], s("A")),
            ])
            .unwrap();

        assert_eq!(machine.available_events(), vec!["ab"]);
        assert!(machine.can_fire("ab"));
        assert!(!machine.can_fire("bc"));
        assert!(!machine.can_fire("missing"));

        machine.fire("ab").unwrap();
        assert_eq!(machine.available_events(), vec!["bc", "reset"]);
    }

    #[test]
    fn long_runs_append_history_in_place() {
        let mut machine = machine();
        machine
            .register_events(vec![
                Event::new("ab", vec![s("A")], s("B")),
                Event::new("ba", vec![s("B")], s("A")),
            ])
            .unwrap();

        for i in 0..10_000 {
            machine.fire(if i % 2 == 0 { "ab" } else { "ba" }).unwrap();
        }

        assert_eq!(machine.history().len(), 10_000);
        assert_eq!(machine.history().last().unwrap().event, "ba");
        assert_eq!(machine.current_state(), "A");
    }

    #[test]
    fn history_limit_keeps_newest_transitions() {
        let mut machine = machine().with_history_limit(4);
        machine
            .register_events(vec![
                Event::new("ab", vec![s("A")], s("B")),
                Event::new("ba", vec![s("B")], s("A")),
            ])
            .unwrap();

        for i in 0..1_001 {
            machine.fire(if i % 2 == 0 { "ab" } else { "ba" }).unwrap();
        }

        assert_eq!(machine.history().len(), 4);
        assert_eq!(machine.history().limit(), Some(4));
        let events: Vec<&str> = machine
            .history()
            .transitions()
            .map(|t| t.event.as_str())
            .collect();
        assert_eq!(events, vec!["ba", "ab", "ba", "ab"]);
        assert_eq!(machine.current_state(), "B");
    }

    #[test]
    fn history_limit_trims_existing_records() {
        let mut machine = Machine::new(states(&["A", "B", "C"]), s("A")).unwrap();
        machine
            .register_events(vec![
                Event::new("ab", vec![s("A")], s("B")),
                Event::new("bc", vec![s("B")], s("C")),
            ])
            .unwrap();
        machine.fire("ab").unwrap();
        machine.fire("bc").unwrap();

        let machine = machine.with_history_limit(1);

        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.history().last().unwrap().event, "bc");
    }

    #[test]
    fn clear_history_keeps_state_and_limit() {
        let mut machine = machine().with_history_limit(8);
        machine.register_event(go()).unwrap();
        machine.fire("go").unwrap();

        machine.clear_history();

        assert!(machine.history().is_empty());
        assert_eq!(machine.history().limit(), Some(8));
        assert_eq!(machine.current_state(), "B");
    }
}
