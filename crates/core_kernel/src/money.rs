//! Won amounts with precise decimal arithmetic
//!
//! Labor fees and settlement totals are always Korean won. The type wraps
//! rust_decimal so sums never drift the way floating point would.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    Negative(String),
}

/// A won amount
///
/// Stored with zero decimal places; won has no minor unit. Arithmetic is
/// exact via rust_decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Won(Decimal);

impl Won {
    /// Creates a new amount, rounded to whole won
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(0))
    }

    /// Creates an amount from an integer number of won
    pub fn from_i64(amount: i64) -> Self {
        Self(Decimal::new(amount, 0))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Validates that the amount is non-negative
    pub fn ensure_non_negative(self) -> Result<Self, MoneyError> {
        if self.is_negative() {
            return Err(MoneyError::Negative(self.0.to_string()));
        }
        Ok(self)
    }

    /// Multiplies by an integer count (per-grade tallies)
    pub fn times(&self, count: u32) -> Self {
        Self(self.0 * Decimal::from(count))
    }
}

impl Default for Won {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Won {
    type Output = Won;

    fn add(self, rhs: Won) -> Won {
        Won(self.0 + rhs.0)
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, rhs: Won) {
        self.0 += rhs.0;
    }
}

impl Sub for Won {
    type Output = Won;

    fn sub(self, rhs: Won) -> Won {
        Won(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Won {
    type Output = Won;

    fn mul(self, rhs: Decimal) -> Won {
        Won::new(self.0 * rhs)
    }
}

impl Neg for Won {
    type Output = Won;

    fn neg(self) -> Won {
        Won(-self.0)
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Won {
        iter.fold(Won::zero(), |acc, w| acc + w)
    }
}

impl From<i64> for Won {
    fn from(amount: i64) -> Self {
        Self::from_i64(amount)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Thousands-grouped, e.g. "120,000원"
        let negative = self.0.is_sign_negative();
        let digits = self.0.abs().round_dp(0).to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        if negative {
            write!(f, "-{}원", grouped)
        } else {
            write!(f, "{}원", grouped)
        }
    }
}
