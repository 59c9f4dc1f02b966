//! Domain error types.

use thiserror::Error;

use crate::machine::{CatalogError, MachineError};

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A command was rejected by the machine.
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    /// A catalog failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
