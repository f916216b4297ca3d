//! # Money Module
//!
//! Provides the `Money` type used for every displayed price.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The CMS hands prices over as JSON numbers or strings:                  │
//! │    3.25, "6.50", 12.99                                                  │
//! │                                                                         │
//! │  Floats print badly and compare badly:                                  │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the mapping boundary into cents,         │
//! │  then every card, schema and carousel slide formats the same i64.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crumbs_core::money::Money;
//!
//! let price = Money::from_cents(325);
//! assert_eq!(price.to_string(), "$3.25");
//!
//! let parsed = Money::parse_decimal("6.5").unwrap();
//! assert_eq!(parsed.cents(), 650);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

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

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Plain decimal form without the currency sign, e.g. `6.50`.
    ///
    /// Used where a machine-readable amount is expected (schema.org offers).
    pub fn decimal(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Parses a decimal price string such as `"6.50"`, `"6.5"`, `"$4"`.
    ///
    /// Digits beyond the second decimal place are rounded half-up.
    /// Returns `None` for anything that is not a plain non-negative decimal.
    ///
    /// ## Example
    /// ```rust
    /// use crumbs_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("3.25").unwrap().cents(), 325);
    /// assert_eq!(Money::parse_decimal("$12").unwrap().cents(), 1200);
    /// assert_eq!(Money::parse_decimal("4.255").unwrap().cents(), 426);
    /// assert!(Money::parse_decimal("abc").is_none());
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let trimmed = input.trim().trim_start_matches('$');
        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().ok()?.checked_mul(100)?
        };

        let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let frac_cents = tenths * 10 + hundredths + i64::from(round_up);
        whole_cents.checked_add(frac_cents).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$3.25`, the format every card and slide uses.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
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
        let money = Money::from_cents(1299);
        assert_eq!(money.cents(), 1299);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(325)), "$3.25");
        assert_eq!(format!("{}", Money::from_cents(650)), "$6.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
    }

    #[test]
    fn test_decimal() {
        assert_eq!(Money::from_cents(650).decimal(), "6.50");
        assert_eq!(Money::from_cents(5).decimal(), "0.05");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("3.25"), Some(Money::from_cents(325)));
        assert_eq!(Money::parse_decimal("6.5"), Some(Money::from_cents(650)));
        assert_eq!(Money::parse_decimal(" $5.75 "), Some(Money::from_cents(575)));
        assert_eq!(Money::parse_decimal("12"), Some(Money::from_cents(1200)));
        assert_eq!(Money::parse_decimal(".99"), Some(Money::from_cents(99)));
        assert_eq!(Money::parse_decimal("4.254"), Some(Money::from_cents(425)));
        assert_eq!(Money::parse_decimal("4.255"), Some(Money::from_cents(426)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("-3.00"), None);
        assert_eq!(Money::parse_decimal("3,25"), None);
        assert_eq!(Money::parse_decimal("free"), None);
    }

    #[test]
    fn test_add() {
        let total = Money::from_cents(325) + Money::from_cents(475);
        assert_eq!(total.cents(), 800);
    }
}
