//! Command handling infrastructure.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use event_log::{DomainEvent, Version};

use crate::aggregate::Aggregate;
use crate::clock::Clock;
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after applying the new events.
    pub aggregate: A,

    /// The events that were generated and appended.
    pub events: Vec<A::Event>,

    /// The new version of the aggregate after the command.
    pub new_version: Version,
}

/// Trait for commands that can be executed against an aggregate.
///
/// Commands represent an intention to perform an action. They may be rejected
/// if the aggregate's current state doesn't allow the action.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Returns the command name, used as a metrics label.
    fn command_type(&self) -> &'static str;
}

/// Handler for executing commands against aggregates.
///
/// The handler is responsible for:
/// 1. Reading the current time once from its clock
/// 2. Executing the command to produce events
/// 3. Appending the events to produce the next aggregate value
pub struct CommandHandler<C, A>
where
    C: Clock,
    A: Aggregate,
{
    clock: C,
    _phantom: PhantomData<A>,
}

impl<C, A> CommandHandler<C, A>
where
    C: Clock,
    A: Aggregate,
{
    /// Creates a new command handler reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the clock's current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Executes a command against `aggregate`.
    ///
    /// The aggregate itself is left untouched; the result carries the next
    /// value. A rejected command produces no events.
    pub fn execute(
        &self,
        aggregate: &A,
        command: &A::Command,
    ) -> Result<CommandResult<A>, DomainError>
    where
        DomainError: From<A::Error>,
    {
        let command_type = command.command_type();
        metrics::counter!("vending_commands_total", "command" => command_type).increment(1);

        let now = self.clock.now();
        let events = aggregate.handle(command, now)?;

        if events.is_empty() {
            tracing::debug!(
                aggregate_type = A::aggregate_type(),
                command = command_type,
                "command produced no events"
            );
            return Ok(CommandResult {
                aggregate: aggregate.clone(),
                events: vec![],
                new_version: aggregate.version(),
            });
        }

        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            command = command_type,
            events = ?events.iter().map(DomainEvent::event_type).collect::<Vec<_>>(),
            "events decided"
        );

        let aggregate = aggregate.apply_events(events.iter().cloned());
        metrics::counter!("vending_events_appended_total").increment(events.len() as u64);

        Ok(CommandResult {
            new_version: aggregate.version(),
            aggregate,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use event_log::EventLog;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Stamped { at: DateTime<Utc> },
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            "TestStamped"
        }
    }

    #[derive(Debug)]
    enum TestCommand {
        Stamp,
        Noop,
        Reject,
    }

    impl Command for TestCommand {
        fn command_type(&self) -> &'static str {
            match self {
                TestCommand::Stamp => "Stamp",
                TestCommand::Noop => "Noop",
                TestCommand::Reject => "Reject",
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("rejected")]
    struct TestError;

    impl From<TestError> for DomainError {
        fn from(_: TestError) -> Self {
            DomainError::Machine(crate::machine::MachineError::UnknownProduct {
                code: "rejected".to_string(),
            })
        }
    }

    #[derive(Debug, Clone, Default)]
    struct TestAggregate {
        log: EventLog<TestEvent>,
    }

    impl Aggregate for TestAggregate {
        type Event = TestEvent;
        type Command = TestCommand;
        type Error = TestError;

        fn aggregate_type() -> &'static str {
            "TestAggregate"
        }

        fn log(&self) -> &EventLog<TestEvent> {
            &self.log
        }

        fn with_log(&self, log: EventLog<TestEvent>) -> Self {
            Self { log }
        }

        fn handle(
            &self,
            command: &TestCommand,
            now: DateTime<Utc>,
        ) -> Result<Vec<TestEvent>, TestError> {
            match command {
                TestCommand::Stamp => Ok(vec![TestEvent::Stamped { at: now }]),
                TestCommand::Noop => Ok(vec![]),
                TestCommand::Reject => Err(TestError),
            }
        }
    }

    #[test]
    fn test_execute_appends_events() {
        let clock = ManualClock::default();
        let handler: CommandHandler<_, TestAggregate> = CommandHandler::new(clock.clone());

        let result = handler
            .execute(&TestAggregate::default(), &TestCommand::Stamp)
            .unwrap();

        assert_eq!(result.events.len(), 1);
        assert_eq!(result.new_version, Version::new(1));
        assert_eq!(result.aggregate.log().len(), 1);
    }

    #[test]
    fn test_execute_reads_time_from_clock() {
        let clock = ManualClock::default();
        let handler: CommandHandler<_, TestAggregate> = CommandHandler::new(clock.clone());
        clock.advance(chrono::TimeDelta::seconds(10));

        let result = handler
            .execute(&TestAggregate::default(), &TestCommand::Stamp)
            .unwrap();

        assert_eq!(
            result.events,
            vec![TestEvent::Stamped {
                at: DateTime::UNIX_EPOCH + chrono::TimeDelta::seconds(10)
            }]
        );
    }

    #[test]
    fn test_execute_leaves_input_untouched() {
        let handler: CommandHandler<_, TestAggregate> = CommandHandler::new(ManualClock::default());
        let aggregate = TestAggregate::default();

        let first = handler.execute(&aggregate, &TestCommand::Stamp).unwrap();
        let second = handler
            .execute(&first.aggregate, &TestCommand::Stamp)
            .unwrap();

        assert_eq!(aggregate.version(), Version::initial());
        assert_eq!(first.new_version, Version::new(1));
        assert_eq!(second.new_version, Version::new(2));
    }

    #[test]
    fn test_empty_events_keep_version() {
        let handler: CommandHandler<_, TestAggregate> = CommandHandler::new(ManualClock::default());

        let result = handler
            .execute(&TestAggregate::default(), &TestCommand::Noop)
            .unwrap();

        assert!(result.events.is_empty());
        assert_eq!(result.new_version, Version::initial());
    }

    #[test]
    fn test_execute_returns_error_on_rejected_command() {
        let handler: CommandHandler<_, TestAggregate> = CommandHandler::new(ManualClock::default());

        let result = handler.execute(&TestAggregate::default(), &TestCommand::Reject);

        assert!(result.is_err());
    }
}
