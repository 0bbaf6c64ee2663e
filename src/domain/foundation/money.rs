//! Non-negative monetary amount in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Amount of money in cents. Single currency; never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from cents, rejecting negative values.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::negative("amount", cents));
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Money {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Money::from_cents(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
