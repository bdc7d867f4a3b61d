//! Fixed-point money with two-digit resolution.
//!
//! `Money` stores whole cents in a `u64`, so a negative balance cannot be
//! represented at all. Every arithmetic step that can produce a fraction of a
//! cent (only multiplication by a [`Multiplier`]) rounds immediately, half away
//! from zero; addition and subtraction of cents are exact.
//!
//! Serialized as a two-decimal string (`"19.20"`). Deserializing also accepts
//! a bare unsigned integer, read as whole units (`100` is `100.00`).
//!
//! ```
//! use diamond_climb::core::{Money, Multiplier};
//!
//! let bet: Money = "10".parse().unwrap();
//! let payout = bet.times(Multiplier::from_basis_points(19_200));
//! assert_eq!(payout.to_string(), "19.20");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::multiplier::{Multiplier, BASIS_POINTS};

/// Cents per whole currency unit.
pub const CENTS_PER_UNIT: u64 = 100;

/// An amount of money in whole cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// No money.
    pub const ZERO: Money = Money(0);

    /// Create an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create an amount from whole currency units.
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(CENTS_PER_UNIT))
    }

    /// Raw amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtract, returning `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    #[must_use]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Scale by a multiplier, rounding to the nearest cent (half away from zero).
    #[must_use]
    pub fn times(self, multiplier: Multiplier) -> Money {
        let bp = u128::from(BASIS_POINTS);
        let scaled = u128::from(self.0) * u128::from(multiplier.basis_points());
        let rounded = (scaled + bp / 2) / bp;
        Money(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

/// Reasons a decimal string is not a valid amount.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount has more than two decimal places")]
    TooPrecise,
    #[error("amount is too large")]
    Overflow,
    #[error("invalid amount {0:?}")]
    Invalid(String),
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseMoneyError::Negative);
        }

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(ParseMoneyError::Invalid(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooPrecise);
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };
        let mut cents: u64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| ParseMoneyError::Invalid(s.to_string()))?
        };
        if fraction.len() == 1 {
            cents *= 10;
        }

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or(ParseMoneyError::Overflow)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"19.20\", or whole units")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        v.checked_mul(CENTS_PER_UNIT)
            .map(Money)
            .ok_or_else(|| E::custom(ParseMoneyError::Overflow))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        let units = u64::try_from(v).map_err(|_| E::custom(ParseMoneyError::Negative))?;
        self.visit_u64(units)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}
