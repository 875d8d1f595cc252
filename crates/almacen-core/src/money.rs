//! # Money Module
//!
//! Integer-cents money for the store's bookkeeping.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A TILL MUST BALANCE TO THE CENT                                        │
//! │                                                                         │
//! │  Floats cannot promise that:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  So every amount in Almacen is an i64 count of cents:                   │
//! │    cost, derived price, line subtotal, sale total, cash received,       │
//! │    change due, refunded amount, expense amount                          │
//! │                                                                         │
//! │  The database stores the same cents in INTEGER columns. Nothing is      │
//! │  ever "rounded to 2 decimals" at runtime - two decimals is what the     │
//! │  representation IS. The one place fractions appear at all is margin     │
//! │  application in pricing, and that rounds once, explicitly.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use almacen_core::money::Money;
//!
//! let price = Money::from_cents(1600);          // $16.00 on the shelf tag
//! let cash = Money::from_cents(2000);           // customer hands over $20
//! let change = cash - price;
//! assert_eq!(change.cents(), 400);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in cents.
///
/// Signed on purpose: a refunded total, or the change on an underpaid
/// pending sale, is a negative amount and the ledger must be able to say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Wraps a cents count. The only constructor the engines use: every
    /// amount enters the system already in cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Builds an amount from whole units and cents, for hand-written values
    /// in fixtures and seeds.
    ///
    /// For negative amounts pass the sign on the major unit only:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// The raw cents count. This is what gets bound into SQL.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole-unit part, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents part, always 0-99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Magnitude of the amount. What a "customer still owes" display wants
    /// when the stored change is negative.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Unit price × quantity, the line-subtotal step.
    ///
    /// Safe as a plain i64 multiply because quantities are capped by
    /// validation (see `MAX_LINE_QUANTITY` and `MAX_PRICE_CENTS`).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.34` / `-$5.50`.
///
/// For log lines and ticket text; a GUI should format for locale itself.
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

/// Default money is zero.
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

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_round_trip_and_parts() {
        let price = Money::from_cents(1099);
        assert_eq!(price.cents(), 1099);
        assert_eq!(price.dollars(), 10);
        assert_eq!(price.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor_handles_sign() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        // Sign lives on the major unit: -$5.50, not -$4.50.
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_ticket_rendering() {
        assert_eq!(Money::from_cents(1600).to_string(), "$16.00");
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        // Negative change: the customer still owes.
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }

    #[test]
    fn test_change_due_arithmetic() {
        let total = Money::from_cents(2100);
        let cash = Money::from_cents(5000);
        assert_eq!((cash - total).cents(), 2900);

        // Underpayment goes negative instead of saturating.
        let short = Money::from_cents(2000);
        let owed = short - total;
        assert!(owed.is_negative());
        assert_eq!(owed.abs().cents(), 100);
    }

    #[test]
    fn test_accumulation_operators() {
        let mut running = Money::zero();
        running += Money::from_cents(1000);
        running += Money::from_cents(897);
        running -= Money::from_cents(897); // line refunded mid-count
        assert_eq!(running.cents(), 1000);
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert!(Money::default().is_zero());
    }

    #[test]
    fn test_line_subtotal_multiply() {
        // 3 × $2.99 the way a sale line computes it.
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
        assert_eq!((unit_price * 3i64).cents(), 897);
        assert_eq!((unit_price * 3i32).cents(), 897);
    }

    #[test]
    fn test_integer_division_loss_is_visible() {
        // Splitting $10.00 three ways drops exactly one visible cent;
        // cents never hide sub-cent residue the way floats do.
        let whole = Money::from_cents(1000);
        let third = Money::from_cents(1000 / 3);
        let reassembled: Money = third * 3;
        assert_eq!((whole - reassembled).cents(), 1);
    }
}
