//! Core aggregate trait.

use chrono::{DateTime, Utc};
use event_log::{DomainEvent, EventLog, Version};

/// Trait for aggregates in an event-sourced system.
///
/// The aggregate's state is its event log and nothing else. Every derived
/// value is computed from the log when read, and a state change produces a
/// new aggregate value rather than mutating the old one:
/// - `handle` decides events and must not have side effects
/// - `apply_events` never fails (events represent facts that have happened)
pub trait Aggregate: Clone + Send + Sync + Sized {
    /// The type of events this aggregate produces.
    type Event: DomainEvent + Send + Sync;

    /// The type of commands this aggregate accepts.
    type Command: crate::command::Command;

    /// The type of errors this aggregate can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's event log.
    fn log(&self) -> &EventLog<Self::Event>;

    /// Returns the same aggregate holding a different log.
    fn with_log(&self, log: EventLog<Self::Event>) -> Self;

    /// Decides which events a command produces at time `now`.
    ///
    /// An empty list means the command was accepted but changed nothing.
    fn handle(
        &self,
        command: &Self::Command,
        now: DateTime<Utc>,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Returns the current version of the aggregate.
    ///
    /// Version starts at 0 for a new aggregate and increments with each event.
    fn version(&self) -> Version {
        self.log().version()
    }

    /// Returns a new aggregate with `events` appended to its log.
    fn apply_events(&self, events: impl IntoIterator<Item = Self::Event>) -> Self {
        self.with_log(self.log().append(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Incremented,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            "TestIncremented"
        }
    }

    #[derive(Debug)]
    struct Increment {
        times: usize,
    }

    impl Command for Increment {
        fn command_type(&self) -> &'static str {
            "Increment"
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("test error")]
    struct TestError;

    #[derive(Debug, Clone, Default)]
    struct Counter {
        log: EventLog<TestEvent>,
    }

    impl Aggregate for Counter {
        type Event = TestEvent;
        type Command = Increment;
        type Error = TestError;

        fn aggregate_type() -> &'static str {
            "Counter"
        }

        fn log(&self) -> &EventLog<TestEvent> {
            &self.log
        }

        fn with_log(&self, log: EventLog<TestEvent>) -> Self {
            Self { log }
        }

        fn handle(
            &self,
            command: &Increment,
            _now: DateTime<Utc>,
        ) -> Result<Vec<TestEvent>, TestError> {
            if command.times == 0 {
                return Err(TestError);
            }
            Ok(vec![TestEvent::Incremented; command.times])
        }
    }

    #[test]
    fn test_apply_events_returns_new_value() {
        let counter = Counter::default();
        let events = counter.handle(&Increment { times: 2 }, Utc::now()).unwrap();

        let next = counter.apply_events(events);

        assert_eq!(counter.version(), Version::initial());
        assert_eq!(next.version(), Version::new(2));
    }

    #[test]
    fn test_handle_can_reject() {
        let counter = Counter::default();
        assert!(counter.handle(&Increment { times: 0 }, Utc::now()).is_err());
    }
}
