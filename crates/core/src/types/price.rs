//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are exact decimals, never binary floats, so a cart of
//! `1599.99 + 1499.99` totals exactly `3099.98`. Rounding happens only when
//! a price is turned into display text.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for rounded amounts.
const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// A non-currency-tagged amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in the currency's standard unit (dollars, not cents).
    amount: Decimal,
}

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Create a price from a number of cents, e.g. `159_999` for `1599.99`.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, DISPLAY_DECIMAL_PLACES))
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// The price of `quantity` units, exactly.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity))
    }

    /// Format the amount as stored, without padding or rounding (e.g. `$1599.99`, `$1500`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${}", self.amount.normalize())
    }

    /// Format the amount rounded half away from zero to two places (e.g. `$3099.98`, `$0.00`).
    #[must_use]
    pub fn display_rounded(&self) -> String {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMAL_PLACES);
        format!("${rounded}")
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount + rhs.amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
