//! Money type for rupiah amounts.
//!
//! Rupiah prices are whole numbers, so amounts are plain `i64` rupiah and
//! no fractional arithmetic ever happens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Symbol used by [`Money::display`].
pub const CURRENCY_SYMBOL: &str = "Rp";

/// A rupiah amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from whole rupiah.
    pub const fn new(rupiah: i64) -> Self {
        Self(rupiah)
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create an amount from a decimal value, rounding to the nearest rupiah.
    ///
    /// Returns `None` for NaN or infinite input, or values outside `i64`.
    ///
    /// ```
    /// use benih_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(15000.4), Some(Money::new(15000)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let rounded = amount.round();
        if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
            return None;
        }
        Some(Self(rounded as i64))
    }

    /// Amount in whole rupiah.
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(&self, quantity: u64) -> Option<Money> {
        i64::try_from(quantity)
            .ok()
            .and_then(|q| self.0.checked_mul(q))
            .map(Money)
    }

    /// Saturating multiplication by a quantity.
    pub fn saturating_mul(&self, quantity: u64) -> Money {
        self.checked_mul(quantity).unwrap_or(if self.0 < 0 {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        })
    }

    /// Saturating addition.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Sum amounts, returning `None` on overflow.
    pub fn try_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Format with Indonesian digit grouping, without a symbol
    /// (e.g. `"15.000"`).
    pub fn display_amount(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            grouped.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        grouped
    }

    /// Format with the rupiah symbol (e.g. `"Rp 15.000"`).
    pub fn display(&self) -> String {
        format!("{} {}", CURRENCY_SYMBOL, self.display_amount())
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates instead of wrapping.
    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl From<i64> for Money {
    fn from(rupiah: i64) -> Self {
        Self(rupiah)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_amount_grouping() {
        assert_eq!(Money::new(0).display_amount(), "0");
        assert_eq!(Money::new(999).display_amount(), "999");
        assert_eq!(Money::new(1000).display_amount(), "1.000");
        assert_eq!(Money::new(15000).display_amount(), "15.000");
        assert_eq!(Money::new(1234567).display_amount(), "1.234.567");
        assert_eq!(Money::new(-45000).display_amount(), "-45.000");
    }

    #[test]
    fn test_display_with_symbol() {
        assert_eq!(Money::new(45000).display(), "Rp 45.000");
        assert_eq!(Money::new(45000).to_string(), "Rp 45.000");
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(1500.5), Some(Money::new(1501)));
        assert_eq!(Money::from_decimal(-2.0), Some(Money::new(-2)));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(1e300), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Money::new(15000).checked_mul(3), Some(Money::new(45000)));
        assert_eq!(Money::new(i64::MAX).checked_mul(2), None);
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MAX).saturating_mul(2), Money::new(i64::MAX));
    }

    #[test]
    fn test_try_sum() {
        let total = Money::try_sum([Money::new(1000), Money::new(2500)]);
        assert_eq!(total, Some(Money::new(3500)));
        assert_eq!(Money::try_sum([Money::new(i64::MAX), Money::new(1)]), None);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Money::new(15000)).unwrap(), "15000");
    }
}
