//! # Money Module
//!
//! Provides the `Money` type for prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" ──parse──► 999 cents ──store──► DECIMAL(10,2) 9.99           │
//! │    DECIMAL 9.99 ──CAST(ROUND(x * 100) AS INTEGER)──► 999 cents         │
//! │                                                                         │
//! │  Floats only exist at the storage boundary, never in arithmetic.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventory_core::money::Money;
//!
//! let price = Money::from_cents(999);
//! assert_eq!(price.to_string(), "9.99");
//!
//! let parsed = Money::parse("12.5").unwrap();
//! assert_eq!(parsed.cents(), 1250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Serialized as the plain cent count so JSON output never carries floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Reasons a decimal amount string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal amount")]
    NotANumber(String),

    #[error("at most two decimal places are allowed")]
    TooManyDecimals,

    #[error("amount is too large")]
    Overflow,
}

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns the amount as a decimal number for binding to a DECIMAL column.
    ///
    /// ## Note
    /// Only the database layer should call this. Two decimal places survive
    /// the round trip because reads go through `ROUND(x * 100)`.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a decimal amount such as `"9.99"`, `"10"` or `"-0.5"`.
    ///
    /// ## Rules
    /// - Optional leading `-` or `+`
    /// - At most two digits after the decimal point
    /// - Surrounding whitespace is ignored
    ///
    /// ## Example
    /// ```rust
    /// use inventory_core::money::Money;
    ///
    /// assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
    /// assert_eq!(Money::parse("3").unwrap().cents(), 300);
    /// assert!(Money::parse("1.999").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseMoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !all_digits(whole)
            || !all_digits(fraction)
        {
            return Err(ParseMoneyError::NotANumber(trimmed.to_string()));
        }

        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooManyDecimals);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };

        // "5" is 50 cents, "05" is 5 cents
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| ParseMoneyError::Overflow)? * 10,
            _ => fraction.parse().map_err(|_| ParseMoneyError::Overflow)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("9.99"), matching how the DECIMAL columns read.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

/// Used by sqlx `try_from` when decoding the cent columns.
impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(999).to_string(), "9.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!(Money::parse("9.99"), Ok(Money::from_cents(999)));
        assert_eq!(Money::parse(" 10 "), Ok(Money::from_cents(1000)));
        assert_eq!(Money::parse("0.5"), Ok(Money::from_cents(50)));
        assert_eq!(Money::parse(".05"), Ok(Money::from_cents(5)));
        assert_eq!(Money::parse("7."), Ok(Money::from_cents(700)));
        assert_eq!(Money::parse("-2.25"), Ok(Money::from_cents(-225)));
        assert_eq!("+1.01".parse::<Money>(), Ok(Money::from_cents(101)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(ParseMoneyError::Empty));
        assert_eq!(Money::parse("1.234"), Err(ParseMoneyError::TooManyDecimals));
        assert!(matches!(Money::parse("abc"), Err(ParseMoneyError::NotANumber(_))));
        assert!(matches!(Money::parse("."), Err(ParseMoneyError::NotANumber(_))));
        assert!(matches!(Money::parse("1,50"), Err(ParseMoneyError::NotANumber(_))));
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(999).to_decimal(), 9.99);
        assert_eq!(Money::from_cents(1).to_decimal(), 0.01);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "999");
    }
}
