//! # Money Module
//!
//! The `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! Floating point cannot represent retail amounts exactly (`0.1 + 0.2 !=
//! 0.3`), so every amount in the system is an `i64` in the smallest currency
//! unit. The database, calculations, and API all use whole units; only
//! display formatting converts to a human-readable string.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_units(3_500);
//! let line = price * 2;
//! assert_eq!(line.units(), 7_000);
//! assert_eq!(line.to_string(), "Rp 7.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds and corrections may need negative values
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Full serde support**: serializes as a bare integer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity to get a line total.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let unit_price = Money::from_units(3_500);
    /// assert_eq!(unit_price.multiply_quantity(2).units(), 7_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable rupiah-style formatting with dotted thousands groups.
///
/// For debugging and receipt text; a real frontend would localize properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();

        // Group digits in threes from the right: 1234567 -> 1.234.567
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}Rp {}", sign, grouped)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line totals into a cart or transaction total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(3_500);
        assert_eq!(money.units(), 3_500);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_units(0).to_string(), "Rp 0");
        assert_eq!(Money::from_units(500).to_string(), "Rp 500");
        assert_eq!(Money::from_units(3_500).to_string(), "Rp 3.500");
        assert_eq!(Money::from_units(1_234_567).to_string(), "Rp 1.234.567");
        assert_eq!(Money::from_units(-7_000).to_string(), "-Rp 7.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1_500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3_000);

        let mut c = a;
        c += b;
        assert_eq!(c.units(), 1_500);
        c -= b;
        assert_eq!(c.units(), 1_000);
    }

    #[test]
    fn test_sum_of_line_totals() {
        let total: Money = [Money::from_units(7_000), Money::from_units(2_500)]
            .into_iter()
            .sum();
        assert_eq!(total.units(), 9_500);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_units(1).is_positive());
        assert!(!Money::from_units(-1).is_positive());
    }
}
