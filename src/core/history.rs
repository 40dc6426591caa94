//! Transition history tracking.
//!
//! Every successful `fire` leaves one [`TransitionRecord`] behind. Direct
//! state overrides are restorations rather than transitions and are not
//! recorded.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use transit::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "start".to_string(),
///     from: "Idle".to_string(),
///     to: "Running".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.event, "start");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// Name of the event that was fired
    pub event: String,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of completed transitions.
///
/// `record` returns a new history with the transition appended and leaves
/// `self` untouched. The machine itself appends in place with `push`. A
/// history built with [`History::with_limit`] keeps only the newest `limit`
/// records.
///
/// # Example
///
/// ```rust
/// use transit::core::{History, TransitionRecord};
/// use chrono::Utc;
///
/// let history = History::new().record(TransitionRecord {
///     event: "go".to_string(),
///     from: "A".to_string(),
///     to: "B".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.path(), vec![&"A".to_string(), &"B".to_string()]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct History<S: State> {
    transitions: VecDeque<TransitionRecord<S>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S: State> History<S> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        History {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history retaining at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        History {
            transitions: VecDeque::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    /// Maximum number of retained records, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Return a new history with `record` appended. `self` is unchanged.
    pub fn record(&self, record: TransitionRecord<S>) -> Self {
        let mut history = self.clone();
        history.push(record);
        history
    }

    /// Append in place, evicting the oldest records beyond the limit.
    pub(crate) fn push(&mut self, record: TransitionRecord<S>) {
        self.transitions.push_back(record);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }

    /// States visited, in order: the first `from`, then every `to`.
    ///
    /// Empty when nothing has been recorded.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All retained transitions, oldest first.
    pub fn transitions(
        &self,
    ) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> + ExactSizeIterator + '_ {
        self.transitions.iter()
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: State> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}
