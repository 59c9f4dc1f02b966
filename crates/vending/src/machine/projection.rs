//! Read model derived from a machine's event log.

use chrono::{DateTime, Utc};
use event_log::EventLog;
use serde::{Deserialize, Serialize};

use super::events::{
    BalanceDecreasedData, BalanceIncreasedData, CoinAcceptedData, CoinReturnedData,
    CoinsCollectedData, ProductDispensedData, ProductsCollectedData,
};
use super::{Coin, Money, Product, VendingEvent};

/// An event that puts a temporary message on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEvent {
    /// A button was pressed without enough credit.
    ButtonPressed {
        product: Product,
        occurred_at: DateTime<Utc>,
    },
    /// A product was sold.
    ProductDispensed {
        product: Product,
        occurred_at: DateTime<Utc>,
    },
    /// A refund could not be made exactly.
    InsufficientChange {
        requested: Money,
        occurred_at: DateTime<Utc>,
    },
}

impl TimedEvent {
    /// Returns the timed view of `event`, if it carries a timestamp.
    pub fn from_event(event: &VendingEvent) -> Option<Self> {
        match event {
            VendingEvent::ButtonPressed(data) => Some(TimedEvent::ButtonPressed {
                product: data.product,
                occurred_at: data.occurred_at,
            }),
            VendingEvent::ProductDispensed(data) => Some(TimedEvent::ProductDispensed {
                product: data.product,
                occurred_at: data.occurred_at,
            }),
            VendingEvent::InsufficientChange(data) => Some(TimedEvent::InsufficientChange {
                requested: data.requested,
                occurred_at: data.occurred_at,
            }),
            _ => None,
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TimedEvent::ButtonPressed { occurred_at, .. }
            | TimedEvent::ProductDispensed { occurred_at, .. }
            | TimedEvent::InsufficientChange { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Everything observable about a machine, computed from its log.
///
/// Nothing here is stored. Build it again after every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineView {
    /// Credit not yet spent or refunded.
    pub balance: Money,
    /// Products waiting in the product chute.
    pub chute: Vec<Product>,
    /// Coins waiting in the coin chute.
    pub coin_chute: Vec<Coin>,
    /// Accepted coins still inside the machine.
    pub available_coins: Vec<Coin>,
    /// Timestamped events in log order.
    pub timed_events: Vec<TimedEvent>,
}

impl MachineView {
    /// Projects a log.
    pub fn from_log(log: &EventLog<VendingEvent>) -> Self {
        Self {
            balance: active_amount(log),
            chute: chute(log),
            coin_chute: coin_chute(log),
            available_coins: available_coins(log),
            timed_events: timed_events(log),
        }
    }
}

/// Credit in: all increases minus all decreases.
pub fn active_amount(log: &EventLog<VendingEvent>) -> Money {
    let increased: Money = log
        .of_type::<BalanceIncreasedData>()
        .into_iter()
        .map(|data| data.amount)
        .sum();
    let decreased: Money = log
        .of_type::<BalanceDecreasedData>()
        .into_iter()
        .map(|data| data.amount)
        .sum();
    increased - decreased
}

/// Products dispensed since the chute was last emptied.
pub fn chute(log: &EventLog<VendingEvent>) -> Vec<Product> {
    log.since_last::<ProductsCollectedData>()
        .of_type::<ProductDispensedData>()
        .into_iter()
        .map(|data| data.product)
        .collect()
}

/// Coins returned since the coin chute was last emptied.
pub fn coin_chute(log: &EventLog<VendingEvent>) -> Vec<Coin> {
    log.since_last::<CoinsCollectedData>()
        .of_type::<CoinReturnedData>()
        .into_iter()
        .map(|data| data.coin.clone())
        .collect()
}

/// Accepted coins minus returned coins, as multisets.
///
/// A returned coin only cancels an accepted coin that is still inside.
/// Rejected coins are returned without ever being accepted and cancel
/// nothing.
pub fn available_coins(log: &EventLog<VendingEvent>) -> Vec<Coin> {
    let mut available: Vec<Coin> = log
        .of_type::<CoinAcceptedData>()
        .into_iter()
        .map(|data| data.coin.clone())
        .collect();
    for returned in log.of_type::<CoinReturnedData>() {
        if let Some(index) = available.iter().position(|coin| *coin == returned.coin) {
            available.remove(index);
        }
    }
    available
}

/// Timestamped events, oldest first.
pub fn timed_events(log: &EventLog<VendingEvent>) -> Vec<TimedEvent> {
    log.iter().filter_map(TimedEvent::from_event).collect()
}
