//! Money type for representing currency amounts
//!
//! Wraps a [`Decimal`] that is always rounded to cents, so every stored
//! subtotal, tax and total is exact to two places and recalculation cannot
//! drift.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Decimal places kept for monetary values
pub const CENT_PLACES: u32 = 2;

/// Round to the nearest cent, halves away from zero (`10.005 → 10.01`)
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// A monetary amount rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount, rounding to cents
    ///
    /// # Examples
    /// ```
    /// use freelance::models::Money;
    /// use rust_decimal_macros::dec;
    /// assert_eq!(Money::new(dec!(10.005)).amount(), dec!(10.01));
    /// ```
    pub fn new(value: Decimal) -> Self {
        Self(round2(value))
    }

    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The rounded decimal amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format with a currency code or symbol after the amount (`960.00 EUR`)
    pub fn format_with_currency(&self, currency: &str) -> String {
        if currency.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", self, currency)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
