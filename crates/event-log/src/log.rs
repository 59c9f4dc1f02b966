use serde::{Deserialize, Serialize};

use crate::{DomainEvent, EventVariant, Version};

/// Ordered, append-only sequence of events for one aggregate.
///
/// Order is the only source of truth. Events are never removed or
/// reordered: "emptying" something is modelled by appending a marker event
/// and reading the suffix after it with [`EventLog::since_last`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog<E> {
    events: Vec<E>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventLog<E> {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log holding `events` in the given order.
    pub fn from_events(events: impl IntoIterator<Item = E>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the log's current version.
    pub fn version(&self) -> Version {
        Version::initial().advanced_by(self.events.len())
    }

    /// Returns all events, oldest first.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Iterates over all events, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }

    /// Returns the most recently appended event.
    pub fn last(&self) -> Option<&E> {
        self.events.last()
    }

    /// Returns the ordered data of every event of variant `T`.
    pub fn of_type<T>(&self) -> Vec<&T>
    where
        T: EventVariant<E>,
    {
        self.events.iter().filter_map(T::from_event).collect()
    }
}

impl<E: DomainEvent> EventLog<E> {
    /// Returns a new log with `events` appended in order.
    pub fn append(&self, events: impl IntoIterator<Item = E>) -> Self {
        let mut appended = self.events.clone();
        let before = appended.len();
        appended.extend(events);
        tracing::trace!(
            appended = appended.len() - before,
            version = appended.len(),
            "events appended"
        );
        Self { events: appended }
    }

    /// Returns the events strictly after the last event of variant `T`.
    ///
    /// If the log holds no such event the whole log is returned.
    pub fn since_last<T>(&self) -> Self
    where
        T: EventVariant<E>,
    {
        match self.events.iter().rposition(|event| T::matches(event)) {
            Some(index) => Self {
                events: self.events[index + 1..].to_vec(),
            },
            None => self.clone(),
        }
    }

    /// Returns the names of all events in order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.iter().map(DomainEvent::event_type).collect()
    }
}

impl<'a, E> IntoIterator for &'a EventLog<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
