//! Non-negative currency amounts with exact cent precision.
//!
//! Parsed through `rust_decimal` so that no floating-point rounding can leak
//! into the dollar fields of the file.

use crate::error::{AchError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A currency amount stored as a whole number of cents.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use ach_encoder::Amount;
///
/// let amount = Amount::from_str("100.5").unwrap();
/// assert_eq!(amount.cents(), 10050);
/// assert_eq!(amount.to_string(), "100.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(u64);

impl Amount {
    /// Number of fractional digits carried in the file.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(0);

    /// Creates an amount from an integer number of cents.
    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Converts a decimal dollar value into cents.
    ///
    /// Negative values and values with sub-cent precision are rejected:
    /// neither has a representation in the file.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AchError::validation(
                "amount",
                format!("{} is negative", value),
            ));
        }

        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| AchError::validation("amount", format!("{} is out of range", value)))?;
        if !scaled.fract().is_zero() {
            return Err(AchError::validation(
                "amount",
                format!("{} has more than {} decimal places", value, Self::SCALE),
            ));
        }

        scaled
            .to_u64()
            .map(Amount)
            .ok_or_else(|| AchError::validation("amount", format!("{} is out of range", value)))
    }

    /// Whole number of cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    fn as_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), Self::SCALE)
    }
}

impl FromStr for Amount {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).map_err(|e| {
            AchError::validation("amount", format!("'{}' is not a number: {}", trimmed, e))
        })?;
        Amount::from_decimal(decimal)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_decimal())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
