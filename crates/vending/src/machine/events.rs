//! Vending machine domain events.

use chrono::{DateTime, Utc};
use event_log::{DomainEvent, EventVariant};
use serde::{Deserialize, Serialize};

use super::{Coin, Money, Product};

/// Events that can occur on a vending machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum VendingEvent {
    /// A recognized coin was deposited.
    CoinAccepted(CoinAcceptedData),

    /// A coin was ejected to the coin chute.
    CoinReturned(CoinReturnedData),

    /// Credit went up.
    BalanceIncreased(BalanceIncreasedData),

    /// Credit went down.
    BalanceDecreased(BalanceDecreasedData),

    /// A product was delivered to the chute.
    ProductDispensed(ProductDispensedData),

    /// A product button was pressed without enough credit.
    ButtonPressed(ButtonPressedData),

    /// The product chute was emptied.
    ProductsCollected(ProductsCollectedData),

    /// The coin chute was emptied.
    CoinsCollected(CoinsCollectedData),

    /// A refund was requested but exact change could not be made.
    InsufficientChange(InsufficientChangeData),
}

impl DomainEvent for VendingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            VendingEvent::CoinAccepted(_) => "CoinAccepted",
            VendingEvent::CoinReturned(_) => "CoinReturned",
            VendingEvent::BalanceIncreased(_) => "BalanceIncreased",
            VendingEvent::BalanceDecreased(_) => "BalanceDecreased",
            VendingEvent::ProductDispensed(_) => "ProductDispensed",
            VendingEvent::ButtonPressed(_) => "ButtonPressed",
            VendingEvent::ProductsCollected(_) => "ProductsCollected",
            VendingEvent::CoinsCollected(_) => "CoinsCollected",
            VendingEvent::InsufficientChange(_) => "InsufficientChange",
        }
    }
}

/// Data for CoinAccepted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinAcceptedData {
    pub coin: Coin,
}

/// Data for CoinReturned event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinReturnedData {
    pub coin: Coin,
}

/// Data for BalanceIncreased event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceIncreasedData {
    pub amount: Money,
}

/// Data for BalanceDecreased event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDecreasedData {
    pub amount: Money,
}

/// Data for ProductDispensed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDispensedData {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ButtonPressed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPressedData {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Data for ProductsCollected event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsCollectedData;

/// Data for CoinsCollected event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsCollectedData;

/// Data for InsufficientChange event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientChangeData {
    /// The balance the machine failed to refund.
    pub requested: Money,
    pub occurred_at: DateTime<Utc>,
}

macro_rules! event_variant {
    ($($variant:ident => $data:ty),+ $(,)?) => {
        $(
            impl EventVariant<VendingEvent> for $data {
                fn from_event(event: &VendingEvent) -> Option<&Self> {
                    match event {
                        VendingEvent::$variant(data) => Some(data),
                        _ => None,
                    }
                }
            }
        )+
    };
}

event_variant! {
    CoinAccepted => CoinAcceptedData,
    CoinReturned => CoinReturnedData,
    BalanceIncreased => BalanceIncreasedData,
    BalanceDecreased => BalanceDecreasedData,
    ProductDispensed => ProductDispensedData,
    ButtonPressed => ButtonPressedData,
    ProductsCollected => ProductsCollectedData,
    CoinsCollected => CoinsCollectedData,
    InsufficientChange => InsufficientChangeData,
}

// Convenience constructors for events
impl VendingEvent {
    pub fn coin_accepted(coin: Coin) -> Self {
        VendingEvent::CoinAccepted(CoinAcceptedData { coin })
    }

    pub fn coin_returned(coin: Coin) -> Self {
        VendingEvent::CoinReturned(CoinReturnedData { coin })
    }

    pub fn balance_increased(amount: Money) -> Self {
        VendingEvent::BalanceIncreased(BalanceIncreasedData { amount })
    }

    pub fn balance_decreased(amount: Money) -> Self {
        VendingEvent::BalanceDecreased(BalanceDecreasedData { amount })
    }

    pub fn product_dispensed(product: Product, occurred_at: DateTime<Utc>) -> Self {
        VendingEvent::ProductDispensed(ProductDispensedData {
            product,
            occurred_at,
        })
    }

    pub fn button_pressed(product: Product, occurred_at: DateTime<Utc>) -> Self {
        VendingEvent::ButtonPressed(ButtonPressedData {
            product,
            occurred_at,
        })
    }

    pub fn products_collected() -> Self {
        VendingEvent::ProductsCollected(ProductsCollectedData)
    }

    pub fn coins_collected() -> Self {
        VendingEvent::CoinsCollected(CoinsCollectedData)
    }

    pub fn insufficient_change(requested: Money, occurred_at: DateTime<Utc>) -> Self {
        VendingEvent::InsufficientChange(InsufficientChangeData {
            requested,
            occurred_at,
        })
    }

    /// Returns when the event happened, for events that carry a timestamp.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            VendingEvent::ProductDispensed(data) => Some(data.occurred_at),
            VendingEvent::ButtonPressed(data) => Some(data.occurred_at),
            VendingEvent::InsufficientChange(data) => Some(data.occurred_at),
            VendingEvent::CoinAccepted(_)
            | VendingEvent::CoinReturned(_)
            | VendingEvent::BalanceIncreased(_)
            | VendingEvent::BalanceDecreased(_)
            | VendingEvent::ProductsCollected(_)
            | VendingEvent::CoinsCollected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let now = Utc::now();
        let cases = [
            (VendingEvent::coin_accepted(Coin::one_euro()), "CoinAccepted"),
            (VendingEvent::coin_returned(Coin::one_euro()), "CoinReturned"),
            (
                VendingEvent::balance_increased(Money::from_cents(100)),
                "BalanceIncreased",
            ),
            (
                VendingEvent::balance_decreased(Money::from_cents(100)),
                "BalanceDecreased",
            ),
            (
                VendingEvent::product_dispensed(Product::Cola, now),
                "ProductDispensed",
            ),
            (VendingEvent::button_pressed(Product::Cola, now), "ButtonPressed"),
            (VendingEvent::products_collected(), "ProductsCollected"),
            (VendingEvent::coins_collected(), "CoinsCollected"),
            (
                VendingEvent::insufficient_change(Money::from_cents(35), now),
                "InsufficientChange",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.event_type(), expected);
        }
    }

    #[test]
    fn test_variant_selection() {
        let event = VendingEvent::coin_returned(Coin::ten_cent());

        assert_eq!(
            CoinReturnedData::from_event(&event).map(|data| &data.coin),
            Some(&Coin::ten_cent())
        );
        assert!(CoinAcceptedData::from_event(&event).is_none());
        assert!(!CoinsCollectedData::matches(&event));
    }

    #[test]
    fn test_only_timed_events_have_timestamp() {
        let now = Utc::now();
        assert_eq!(
            VendingEvent::button_pressed(Product::Chips, now).occurred_at(),
            Some(now)
        );
        assert_eq!(VendingEvent::coins_collected().occurred_at(), None);
        assert_eq!(
            VendingEvent::balance_increased(Money::from_cents(5)).occurred_at(),
            None
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = VendingEvent::product_dispensed(Product::Candy, Utc::now());

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ProductDispensed\""));
        assert!(json.contains("\"CANDY\""));

        let deserialized: VendingEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_marker_event_serialization() {
        let event = VendingEvent::products_collected();

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: VendingEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
