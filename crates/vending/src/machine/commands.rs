//! Machine commands and queries.

use crate::command::Command;

use super::{Coin, Money, Product};

/// Commands a customer can issue to a machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineCommand {
    /// Drop a coin into the slot.
    InsertCoin(Coin),

    /// Press the button with the given product code.
    ChooseProduct(String),

    /// Empty the product chute.
    TakeProducts,

    /// Ask for the balance back.
    ReturnCoins,

    /// Empty the coin chute.
    TakeCoins,
}

impl MachineCommand {
    /// Creates an InsertCoin command.
    pub fn insert_coin(coin: Coin) -> Self {
        MachineCommand::InsertCoin(coin)
    }

    /// Creates a ChooseProduct command.
    pub fn choose_product(code: impl Into<String>) -> Self {
        MachineCommand::ChooseProduct(code.into())
    }
}

impl Command for MachineCommand {
    fn command_type(&self) -> &'static str {
        match self {
            MachineCommand::InsertCoin(_) => "InsertCoin",
            MachineCommand::ChooseProduct(_) => "ChooseProduct",
            MachineCommand::TakeProducts => "TakeProducts",
            MachineCommand::ReturnCoins => "ReturnCoins",
            MachineCommand::TakeCoins => "TakeCoins",
        }
    }
}

/// Read-only questions about a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineQuery {
    CheckDisplay,
    CheckChute,
    CheckCoinChute,
    CheckActiveAmount,
}

/// Answer to a [`MachineQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResponse {
    Display(String),
    Chute(Vec<Product>),
    CoinChute(Vec<Coin>),
    ActiveAmount(Money),
}
