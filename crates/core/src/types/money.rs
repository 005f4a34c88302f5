//! Monetary amounts backed by decimal arithmetic.
//!
//! Shipping costs are small positive amounts in the store currency; no
//! multi-currency support is needed, so `Money` is a thin wrapper around
//! [`rust_decimal::Decimal`] with display formatting.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a monetary amount from a string.
#[derive(Debug, Error)]
#[error("invalid money amount: {0}")]
pub struct MoneyError(String);

/// A monetary amount in the store currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse an amount from the longest leading numeric prefix, coercing
    /// anything unparseable to zero.
    ///
    /// Form submissions treat a garbled cost leniently: `"12.5abc"` is
    /// 12.50 and `"abc"` is zero, recorded rather than rejected.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        let s = s.trim_start();

        let mut end = 0;
        let mut seen_dot = false;
        for (i, c) in s.char_indices() {
            match c {
                '+' | '-' if i == 0 => end = i + 1,
                '0'..='9' => end = i + 1,
                '.' if !seen_dot => {
                    seen_dot = true;
                    end = i + 1;
                }
                _ => break,
            }
        }

        s.get(..end)
            .map(|prefix| prefix.trim_end_matches('.'))
            .and_then(|prefix| prefix.parse().ok())
            .unwrap_or(Self::ZERO)
    }

    /// Format for display (e.g. "$19.99").
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Self)
            .map_err(|_| MoneyError(s.to_string()))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let m: Money = "12.5".parse().expect("valid amount");
        assert_eq!(m.formatted(), "$12.50");
        assert_eq!(m.to_string(), "12.50");
    }

    #[test]
    fn test_parse_lossy_garbage_is_zero() {
        assert_eq!(Money::parse_lossy("not-a-number"), Money::ZERO);
        assert_eq!(Money::parse_lossy(""), Money::ZERO);
        assert_eq!(Money::parse_lossy("-"), Money::ZERO);
        assert_eq!(Money::parse_lossy(" 7.25 "), "7.25".parse().expect("valid"));
    }

    #[test]
    fn test_parse_lossy_takes_numeric_prefix() {
        assert_eq!(
            Money::parse_lossy("12.5abc"),
            "12.5".parse().expect("valid")
        );
        assert_eq!(Money::parse_lossy("3,50"), "3".parse().expect("valid"));
        assert_eq!(Money::parse_lossy("12."), "12".parse().expect("valid"));
        assert_eq!(
            Money::parse_lossy("-4.00 USD"),
            "-4.00".parse().expect("valid")
        );
    }

    #[test]
    fn test_add() {
        let a: Money = "1.25".parse().expect("valid");
        let b: Money = "2.75".parse().expect("valid");
        assert_eq!((a + b).formatted(), "$4.00");
    }

    #[test]
    fn test_ordering() {
        let cheap: Money = "3".parse().expect("valid");
        let dear: Money = "10".parse().expect("valid");
        assert!(cheap < dear);
        assert!(Money::ZERO.is_zero());
    }
}
