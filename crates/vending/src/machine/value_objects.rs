//! Value objects for the vending domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a machine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(Uuid);

impl MachineId {
    /// Creates a new random machine ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MachineId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Money amount held as a whole number of cents.
///
/// Coin values such as 0.10 and 0.20 have no exact binary floating point
/// form, so every amount in the machine is integer cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates an amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole units (euros), truncated toward zero.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents remaining after whole units.
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Formats with two fraction digits and the given decimal separator.
    pub fn format_with(&self, separator: char) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        format!(
            "{sign}{}{separator}{:02}",
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_with('.'))
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money::from_cents(self.cents + rhs.cents)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money::from_cents(self.cents - rhs.cents)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.cents -= rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |total, amount| total + amount)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A physical coin as the acceptor measures it.
///
/// Two coins are the same coin when every measurement and the name match.
/// A coin's value is not part of its identity: it comes from the
/// [`Catalog`](super::Catalog), and an unknown coin simply has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    name: String,
    /// Diameter in micrometres.
    diameter_um: u32,
    /// Thickness in micrometres.
    thickness_um: u32,
    /// Mass in milligrams.
    mass_mg: u32,
}

impl Coin {
    /// Creates a coin from its physical measurements.
    pub fn new(name: impl Into<String>, diameter_um: u32, thickness_um: u32, mass_mg: u32) -> Self {
        Self {
            name: name.into(),
            diameter_um,
            thickness_um,
            mass_mg,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diameter_um(&self) -> u32 {
        self.diameter_um
    }

    pub fn thickness_um(&self) -> u32 {
        self.thickness_um
    }

    pub fn mass_mg(&self) -> u32 {
        self.mass_mg
    }

    pub fn one_cent() -> Self {
        Self::new("1 cent", 16_250, 1_670, 2_300)
    }

    pub fn two_cent() -> Self {
        Self::new("2 cent", 18_750, 1_670, 3_060)
    }

    pub fn five_cent() -> Self {
        Self::new("5 cent", 21_250, 1_670, 3_920)
    }

    pub fn ten_cent() -> Self {
        Self::new("10 cent", 19_750, 1_930, 4_100)
    }

    pub fn twenty_cent() -> Self {
        Self::new("20 cent", 22_250, 2_140, 5_740)
    }

    pub fn fifty_cent() -> Self {
        Self::new("50 cent", 24_250, 2_380, 7_800)
    }

    pub fn one_euro() -> Self {
        Self::new("1 euro", 23_250, 2_330, 7_500)
    }

    pub fn two_euro() -> Self {
        Self::new("2 euro", 25_750, 2_200, 8_500)
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coin({})", self.name)
    }
}

/// The products a machine sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Product {
    Cola,
    Chips,
    Candy,
}

impl Product {
    /// Number of products.
    pub const COUNT: usize = 3;

    /// Every product, in button order.
    pub const ALL: [Product; Product::COUNT] = [Product::Cola, Product::Chips, Product::Candy];

    /// Returns the button code.
    pub fn code(&self) -> &'static str {
        match self {
            Product::Cola => "COLA",
            Product::Chips => "CHIPS",
            Product::Candy => "CANDY",
        }
    }

    /// Returns the human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Product::Cola => "Cola",
            Product::Chips => "Chips",
            Product::Candy => "Candy",
        }
    }

    /// Resolves a button code, ignoring ASCII case.
    pub fn from_code(code: &str) -> Option<Product> {
        Product::ALL
            .into_iter()
            .find(|product| product.code().eq_ignore_ascii_case(code.trim()))
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Product::Cola => 0,
            Product::Chips => 1,
            Product::Candy => 2,
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
