//! Event-sourced vending machine.
//!
//! This crate provides:
//! - Aggregate trait for machines whose state is their event log
//! - Command trait and CommandHandler for command processing
//! - Catalog, change making and the display rule
//! - Machine aggregate and MachineService facade

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod machine;

pub use aggregate::Aggregate;
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandHandler, CommandResult};
pub use config::MachineConfig;
pub use error::DomainError;
pub use event_log::{DomainEvent, EventLog, EventVariant, Version};
pub use machine::{
    Catalog, CatalogConfig, CatalogError, ChangeError, ChangeMaker, Coin, DisplayState, Machine,
    MachineCommand, MachineError, MachineId, MachineQuery, MachineService, MachineView, Money,
    Product, QueryResponse, TimedEvent, VendingEvent,
};
