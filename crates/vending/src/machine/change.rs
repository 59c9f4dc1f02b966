//! Change making.
//!
//! Two modes:
//! - unconstrained: greedy over the catalog's denominations, for when the
//!   machine may draw on an unlimited supply of every coin;
//! - constrained: an exact subset-sum search over the coins the machine
//!   actually holds, minimizing the number of coins.
//!
//! Greedy is only minimal for canonical denominations. [`Catalog`] refuses
//! to build from a non-canonical set, see [`non_canonical_amount`].

use thiserror::Error;

use super::{Catalog, Coin, Money};

/// Change could not be made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// No combination of the usable coins adds up to exactly `target`.
    #[error("Cannot make exact change for {target}")]
    Insufficient { target: Money },
}

/// Computes coin combinations for a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChangeMaker<'a> {
    catalog: &'a Catalog,
}

impl<'a> ChangeMaker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Makes change for `target`.
    ///
    /// With `available` the result is drawn from those coins only and is
    /// exact or an error, never partial. Without it the catalog's full coin
    /// set is used.
    pub fn make_change(
        &self,
        target: Money,
        available: Option<&[Coin]>,
    ) -> Result<Vec<Coin>, ChangeError> {
        match available {
            Some(coins) => self.from_available(target, coins),
            None => self.greedy(target),
        }
    }

    /// Largest-denomination-first decomposition over the catalog.
    pub fn greedy(&self, target: Money) -> Result<Vec<Coin>, ChangeError> {
        if target.is_negative() {
            return Err(ChangeError::Insufficient { target });
        }

        let mut remaining = target.cents();
        let mut coins = Vec::new();
        for (coin, value) in self.catalog.coins() {
            let count = remaining / value.cents();
            if count > 0 {
                coins.extend(std::iter::repeat_n(coin.clone(), count as usize));
                remaining -= count * value.cents();
            }
        }

        if remaining == 0 {
            Ok(coins)
        } else {
            Err(ChangeError::Insufficient { target })
        }
    }

    /// Fewest coins from `available` adding up to exactly `target`.
    ///
    /// Coins are tried in descending value order, stable with respect to
    /// `available`. A combination only replaces the best known one when it
    /// is strictly shorter, so among equally short answers the first found
    /// wins. Coins unknown to the catalog are ignored.
    pub fn from_available(
        &self,
        target: Money,
        available: &[Coin],
    ) -> Result<Vec<Coin>, ChangeError> {
        let insufficient = ChangeError::Insufficient { target };
        if target.is_negative() {
            return Err(insufficient);
        }
        if target.is_zero() {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<(&Coin, i64)> = available
            .iter()
            .filter_map(|coin| {
                self.catalog
                    .coin_value(coin)
                    .map(|value| (coin, value.cents()))
            })
            .collect();
        candidates.sort_by(|(_, a), (_, b)| b.cmp(a));

        let total: i64 = candidates.iter().map(|(_, value)| value).sum();
        if total < target.cents() {
            return Err(insufficient);
        }

        let goal = usize::try_from(target.cents()).map_err(|_| insufficient.clone())?;
        // best[amount] holds the shortest known combination, as indices into
        // `candidates`, that sums to `amount`.
        let mut best: Vec<Option<Vec<usize>>> = vec![None; goal + 1];
        best[0] = Some(Vec::new());

        for (index, (_, value)) in candidates.iter().enumerate() {
            let value = *value as usize;
            if value > goal {
                continue;
            }
            // Descending so each coin is used at most once.
            for amount in (value..=goal).rev() {
                let candidate = match &best[amount - value] {
                    Some(previous)
                        if best[amount]
                            .as_ref()
                            .is_none_or(|current| previous.len() + 1 < current.len()) =>
                    {
                        let mut combination = previous.clone();
                        combination.push(index);
                        combination
                    }
                    _ => continue,
                };
                best[amount] = Some(candidate);
            }
        }

        best[goal]
            .take()
            .map(|indices| {
                indices
                    .into_iter()
                    .map(|index| candidates[index].0.clone())
                    .collect()
            })
            .ok_or(insufficient)
    }
}

/// Returns the smallest amount for which greedy change over
/// `denominations` is not minimal, or `None` if the set is canonical.
///
/// `denominations` must be distinct and sorted highest first. Amounts are
/// checked up to the sum of the two largest denominations, past which a
/// first counterexample cannot occur.
pub fn non_canonical_amount(denominations: &[Money]) -> Option<Money> {
    let values: Vec<usize> = denominations
        .iter()
        .filter_map(|value| usize::try_from(value.cents()).ok())
        .filter(|value| *value > 0)
        .collect();
    let limit = match values.as_slice() {
        [] => return None,
        [only] => *only,
        [largest, second, ..] => largest + second,
    };

    // optimal[amount] = fewest coins for `amount` with unlimited supply.
    let mut optimal: Vec<Option<usize>> = vec![None; limit + 1];
    optimal[0] = Some(0);
    for amount in 1..=limit {
        optimal[amount] = values
            .iter()
            .filter(|value| **value <= amount)
            .filter_map(|value| optimal[amount - value].map(|count| count + 1))
            .min();
    }

    (1..=limit)
        .find(|amount| {
            let Some(best) = optimal[*amount] else {
                return false;
            };
            let mut remaining = *amount;
            let mut count = 0;
            for value in &values {
                count += remaining / value;
                remaining %= value;
            }
            remaining != 0 || count > best
        })
        .map(|amount| Money::from_cents(amount as i64))
}
