use serde::{Deserialize, Serialize};

/// Trait for events stored in an [`EventLog`](crate::EventLog).
///
/// Events are facts. They are named in past tense and never change once
/// appended.
pub trait DomainEvent: Clone {
    /// Returns the stable name of the event's variant.
    fn event_type(&self) -> &'static str;
}

/// A single variant of an event union.
///
/// Implemented by each variant's data type so a log can be filtered down to
/// one kind of event without matching on the whole union at every call site.
pub trait EventVariant<E> {
    /// Returns the variant's data if `event` is of this kind.
    fn from_event(event: &E) -> Option<&Self>;

    /// Returns true if `event` is of this kind.
    fn matches(event: &E) -> bool {
        Self::from_event(event).is_some()
    }
}

/// Position of an aggregate in its log.
///
/// A new log is at version 0 and every appended event advances it by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the version of an empty log.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the version reached after `count` further events.
    pub fn advanced_by(&self, count: usize) -> Self {
        Self(self.0 + count as u64)
    }

    /// Returns the raw version value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
