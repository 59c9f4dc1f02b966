//! Vending machine aggregate and related types.

mod aggregate;
mod catalog;
mod change;
mod commands;
mod display;
mod events;
mod projection;
mod service;
mod value_objects;

pub use aggregate::Machine;
pub use catalog::{Catalog, CatalogConfig, CatalogError, CoinEntry, PriceEntry};
pub use change::{ChangeError, ChangeMaker};
pub use commands::{MachineCommand, MachineQuery, QueryResponse};
pub use display::{DisplayState, INSERT_COIN, INSUFFICIENT_COINS, THANK_YOU};
pub use events::{
    BalanceDecreasedData, BalanceIncreasedData, ButtonPressedData, CoinAcceptedData,
    CoinReturnedData, CoinsCollectedData, InsufficientChangeData, ProductDispensedData,
    ProductsCollectedData, VendingEvent,
};
pub use projection::{MachineView, TimedEvent};
pub use service::MachineService;
pub use value_objects::{Coin, MachineId, Money, Product};

use thiserror::Error;

/// Errors that can occur while handling a machine command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The pressed button code names no product.
    #[error("Unknown product: {code}")]
    UnknownProduct { code: String },
}
