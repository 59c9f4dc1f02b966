//! What the machine's display shows.
//!
//! The display is a pure function of the log and the current time. A timed
//! event shows its message for a fixed window after it occurred; once the
//! most recent window has passed the display falls back to the default
//! message for the current balance.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::projection::TimedEvent;
use super::{Catalog, Money};

pub const INSERT_COIN: &str = "INSERT COIN";
pub const THANK_YOU: &str = "THANK YOU";
pub const INSUFFICIENT_COINS: &str = "INSUFFICIENT COINS";

/// State of the display at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    /// Shows the balance, or asks for coins.
    Default,
    /// Shows the message for `event` until `expires_at`.
    TemporaryMessage {
        event: TimedEvent,
        expires_at: DateTime<Utc>,
    },
}

impl DisplayState {
    /// Evaluates the display at `now`.
    ///
    /// Only the most recent timed event can be on screen. Events with equal
    /// timestamps are ordered by their position in `timed_events`, the later
    /// one winning. A window covers `occurred_at` up to but excluding
    /// `occurred_at + window`.
    pub fn at(timed_events: &[TimedEvent], now: DateTime<Utc>, window: TimeDelta) -> Self {
        let latest = timed_events
            .iter()
            .fold(None::<&TimedEvent>, |latest, event| match latest {
                Some(current) if current.occurred_at() > event.occurred_at() => Some(current),
                _ => Some(event),
            });

        match latest {
            Some(event) if now < event.occurred_at() + window => DisplayState::TemporaryMessage {
                event: event.clone(),
                expires_at: event.occurred_at() + window,
            },
            _ => DisplayState::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, DisplayState::Default)
    }

    /// Renders the message text.
    pub fn render(&self, balance: Money, catalog: &Catalog, separator: char) -> String {
        match self {
            DisplayState::Default if balance.is_zero() => INSERT_COIN.to_string(),
            DisplayState::Default => balance.format_with(separator),
            DisplayState::TemporaryMessage { event, .. } => match event {
                TimedEvent::ButtonPressed { product, .. } => {
                    format!(
                        "PRICE {}",
                        catalog.product_price(*product).format_with(separator)
                    )
                }
                TimedEvent::ProductDispensed { .. } => THANK_YOU.to_string(),
                TimedEvent::InsufficientChange { .. } => INSUFFICIENT_COINS.to_string(),
            },
        }
    }
}
