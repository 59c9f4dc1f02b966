//! Coin and product catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::change;
use super::{Coin, Money, Product};

/// Errors detected while building a catalog.
///
/// A catalog is validated once, at construction. A machine never sees an
/// invalid catalog at runtime.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An enumerated product has no price.
    #[error("No price configured for product {product}")]
    MissingPrice { product: Product },

    /// A product was priced more than once.
    #[error("Product {product} is priced more than once")]
    DuplicatePrice { product: Product },

    /// A product price is zero or negative.
    #[error("Invalid price for {product}: {price} (must be greater than 0)")]
    NonPositivePrice { product: Product, price: Money },

    /// A coin value is zero or negative.
    #[error("Invalid value for {coin}: {value} (must be greater than 0)")]
    NonPositiveValue { coin: Coin, value: Money },

    /// The same coin was listed twice.
    #[error("Coin {coin} is listed more than once")]
    DuplicateCoin { coin: Coin },

    /// The catalog accepts no coins at all.
    #[error("Catalog contains no coins")]
    NoCoins,

    /// Greedy change making is not optimal for these denominations.
    #[error("Denominations are not canonical: greedy change for {amount} is not minimal")]
    NonCanonicalDenominations { amount: Money },

    /// The configuration document could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One accepted coin and its value, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEntry {
    pub coin: Coin,
    pub value_cents: i64,
}

/// One product price, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub product: Product,
    pub price_cents: i64,
}

/// Serializable shape of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub coins: Vec<CoinEntry>,
    pub prices: Vec<PriceEntry>,
}

/// Static mapping from coins to values and products to prices.
///
/// Coins are kept in descending value order (ties in listing order), which
/// is the order change making walks them in. The denominations are checked
/// to be canonical so that greedy change making is always minimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    coins: Vec<(Coin, Money)>,
    values: HashMap<Coin, Money>,
    prices: [Money; Product::COUNT],
}

impl Catalog {
    /// Builds and validates a catalog.
    pub fn new(
        coins: impl IntoIterator<Item = (Coin, Money)>,
        prices: impl IntoIterator<Item = (Product, Money)>,
    ) -> Result<Self, CatalogError> {
        let mut listed: Vec<(Coin, Money)> = Vec::new();
        let mut values = HashMap::new();
        for (coin, value) in coins {
            if !value.is_positive() {
                return Err(CatalogError::NonPositiveValue { coin, value });
            }
            if values.insert(coin.clone(), value).is_some() {
                return Err(CatalogError::DuplicateCoin { coin });
            }
            listed.push((coin, value));
        }
        if listed.is_empty() {
            return Err(CatalogError::NoCoins);
        }
        listed.sort_by(|(_, a), (_, b)| b.cmp(a));

        let mut configured: [Option<Money>; Product::COUNT] = [None; Product::COUNT];
        for (product, price) in prices {
            if !price.is_positive() {
                return Err(CatalogError::NonPositivePrice { product, price });
            }
            if configured[product.index()].replace(price).is_some() {
                return Err(CatalogError::DuplicatePrice { product });
            }
        }
        let mut resolved = [Money::zero(); Product::COUNT];
        for product in Product::ALL {
            resolved[product.index()] =
                configured[product.index()].ok_or(CatalogError::MissingPrice { product })?;
        }

        let catalog = Self {
            coins: listed,
            values,
            prices: resolved,
        };
        if let Some(amount) = change::non_canonical_amount(&catalog.denominations()) {
            return Err(CatalogError::NonCanonicalDenominations { amount });
        }
        Ok(catalog)
    }

    /// Builds a catalog from its configuration shape.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        Self::new(
            config
                .coins
                .into_iter()
                .map(|entry| (entry.coin, Money::from_cents(entry.value_cents))),
            config
                .prices
                .into_iter()
                .map(|entry| (entry.product, Money::from_cents(entry.price_cents))),
        )
    }

    /// Parses and validates a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// The euro coin set with the reference product prices.
    pub fn euro() -> Self {
        let coins = vec![
            (Coin::two_euro(), Money::from_cents(200)),
            (Coin::one_euro(), Money::from_cents(100)),
            (Coin::fifty_cent(), Money::from_cents(50)),
            (Coin::twenty_cent(), Money::from_cents(20)),
            (Coin::ten_cent(), Money::from_cents(10)),
            (Coin::five_cent(), Money::from_cents(5)),
            (Coin::two_cent(), Money::from_cents(2)),
            (Coin::one_cent(), Money::from_cents(1)),
        ];
        let values = coins.iter().cloned().collect();
        Self {
            coins,
            values,
            prices: [
                Money::from_cents(100),
                Money::from_cents(50),
                Money::from_cents(65),
            ],
        }
    }

    /// Returns the catalog's configuration shape.
    pub fn to_config(&self) -> CatalogConfig {
        CatalogConfig {
            coins: self
                .coins
                .iter()
                .map(|(coin, value)| CoinEntry {
                    coin: coin.clone(),
                    value_cents: value.cents(),
                })
                .collect(),
            prices: Product::ALL
                .into_iter()
                .map(|product| PriceEntry {
                    product,
                    price_cents: self.product_price(product).cents(),
                })
                .collect(),
        }
    }

    /// Returns the value of a coin, or `None` for a coin the machine rejects.
    pub fn coin_value(&self, coin: &Coin) -> Option<Money> {
        self.values.get(coin).copied()
    }

    /// Returns the price of a product.
    pub fn product_price(&self, product: Product) -> Money {
        self.prices[product.index()]
    }

    /// Returns every accepted coin with its value, highest value first.
    pub fn coins(&self) -> &[(Coin, Money)] {
        &self.coins
    }

    /// Returns the distinct coin values, highest first.
    pub fn denominations(&self) -> Vec<Money> {
        let mut denominations: Vec<Money> = self.coins.iter().map(|(_, value)| *value).collect();
        denominations.dedup();
        denominations
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::euro()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> Vec<(Product, Money)> {
        vec![
            (Product::Cola, Money::from_cents(100)),
            (Product::Chips, Money::from_cents(50)),
            (Product::Candy, Money::from_cents(65)),
        ]
    }

    #[test]
    fn test_euro_catalog() {
        let catalog = Catalog::euro();

        assert_eq!(catalog.coin_value(&Coin::one_cent()), Some(Money::from_cents(1)));
        assert_eq!(catalog.coin_value(&Coin::two_euro()), Some(Money::from_cents(200)));
        assert_eq!(catalog.product_price(Product::Cola), Money::from_cents(100));
        assert_eq!(catalog.product_price(Product::Chips), Money::from_cents(50));
        assert_eq!(catalog.product_price(Product::Candy), Money::from_cents(65));
        assert_eq!(catalog.coins().len(), 8);
    }

    #[test]
    fn test_euro_catalog_passes_validation() {
        let config = Catalog::euro().to_config();
        assert_eq!(Catalog::from_config(config).unwrap(), Catalog::euro());
    }

    #[test]
    fn test_unknown_coin_has_no_value() {
        let fake = Coin::new("2 euro", 25_750, 2_200, 9_000);
        assert_eq!(Catalog::euro().coin_value(&fake), None);
    }

    #[test]
    fn test_coins_are_sorted_highest_first() {
        let catalog = Catalog::new(
            [
                (Coin::ten_cent(), Money::from_cents(10)),
                (Coin::one_euro(), Money::from_cents(100)),
                (Coin::fifty_cent(), Money::from_cents(50)),
            ],
            prices(),
        )
        .unwrap();

        let values: Vec<i64> = catalog.coins().iter().map(|(_, value)| value.cents()).collect();
        assert_eq!(values, vec![100, 50, 10]);
        assert_eq!(
            catalog.denominations(),
            vec![
                Money::from_cents(100),
                Money::from_cents(50),
                Money::from_cents(10)
            ]
        );
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let result = Catalog::new(
            [(Coin::ten_cent(), Money::from_cents(10))],
            [
                (Product::Cola, Money::from_cents(100)),
                (Product::Chips, Money::from_cents(50)),
            ],
        );

        assert!(matches!(
            result,
            Err(CatalogError::MissingPrice {
                product: Product::Candy
            })
        ));
    }

    #[test]
    fn test_duplicate_price_is_rejected() {
        let mut prices = prices();
        prices.push((Product::Cola, Money::from_cents(120)));

        let result = Catalog::new([(Coin::ten_cent(), Money::from_cents(10))], prices);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicatePrice {
                product: Product::Cola
            })
        ));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let result = Catalog::new(
            [(Coin::ten_cent(), Money::from_cents(10))],
            [
                (Product::Cola, Money::from_cents(100)),
                (Product::Chips, Money::zero()),
                (Product::Candy, Money::from_cents(65)),
            ],
        );

        assert!(matches!(
            result,
            Err(CatalogError::NonPositivePrice {
                product: Product::Chips,
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_coin_value_is_rejected() {
        let result = Catalog::new([(Coin::ten_cent(), Money::from_cents(-10))], prices());
        assert!(matches!(result, Err(CatalogError::NonPositiveValue { .. })));
    }

    #[test]
    fn test_duplicate_coin_is_rejected() {
        let result = Catalog::new(
            [
                (Coin::ten_cent(), Money::from_cents(10)),
                (Coin::ten_cent(), Money::from_cents(20)),
            ],
            prices(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateCoin { .. })));
    }

    #[test]
    fn test_empty_coin_set_is_rejected() {
        let result = Catalog::new(Vec::new(), prices());
        assert!(matches!(result, Err(CatalogError::NoCoins)));
    }

    #[test]
    fn test_non_canonical_denominations_are_rejected() {
        let result = Catalog::new(
            [
                (Coin::new("four", 1, 1, 4), Money::from_cents(4)),
                (Coin::new("three", 1, 1, 3), Money::from_cents(3)),
                (Coin::new("one", 1, 1, 1), Money::from_cents(1)),
            ],
            prices(),
        );

        match result {
            Err(CatalogError::NonCanonicalDenominations { amount }) => {
                assert_eq!(amount, Money::from_cents(6))
            }
            other => panic!("expected non-canonical denominations, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "coins": [
                {"coin": {"name": "50 cent", "diameter_um": 24250, "thickness_um": 2380, "mass_mg": 7800}, "value_cents": 50},
                {"coin": {"name": "10 cent", "diameter_um": 19750, "thickness_um": 1930, "mass_mg": 4100}, "value_cents": 10}
            ],
            "prices": [
                {"product": "COLA", "price_cents": 120},
                {"product": "CHIPS", "price_cents": 60},
                {"product": "CANDY", "price_cents": 70}
            ]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();

        assert_eq!(catalog.coin_value(&Coin::fifty_cent()), Some(Money::from_cents(50)));
        assert_eq!(catalog.coin_value(&Coin::one_euro()), None);
        assert_eq!(catalog.product_price(Product::Cola), Money::from_cents(120));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            Catalog::from_json("{\"coins\": ["),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_config_round_trip_through_json() {
        let json = serde_json::to_string(&Catalog::euro().to_config()).unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), Catalog::euro());
    }
}
