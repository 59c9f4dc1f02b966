//! Append-only event log for event-sourced aggregates.
//!
//! The log is a value: appending returns a new log and never changes the
//! one it was called on. Projections select events by variant through the
//! [`EventVariant`] trait.

pub mod event;
pub mod log;

pub use event::{DomainEvent, EventVariant, Version};
pub use log::EventLog;
