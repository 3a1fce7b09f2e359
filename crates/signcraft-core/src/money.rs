//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! Floating point cannot represent most decimal cent values exactly
//! (`0.1 + 0.2 != 0.3`), and the original system priced orders in JS floats.
//! Every monetary value here is an integer count of cents; only the UI layer
//! formats dollars. Where a fractional share of an amount is needed (volume
//! discounts, percentage coupons) the share is computed in basis points with
//! an i128 intermediate and a single explicit rounding.
//!
//! ## Usage
//! ```rust
//! use signcraft_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3i64;             // $32.97
//! let discount = line.percentage_of(2500); // 25% => $8.24
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and corrections may be subtracted below zero
///   mid-calculation; callers clamp where the domain requires it
/// - **Single-field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use signcraft_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a unit count.
    ///
    /// ```rust
    /// use signcraft_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given basis-point share of this amount, rounded half-up.
    ///
    /// `bps` is basis points: 2500 = 25%. The intermediate product uses i128
    /// so large order totals cannot overflow, and the `+ 5000` term rounds
    /// the integer division.
    ///
    /// ```rust
    /// use signcraft_core::money::Money;
    ///
    /// let gross = Money::from_cents(10000); // $100.00
    /// assert_eq!(gross.percentage_of(2500).cents(), 2500); // 25% => $25.00
    /// assert_eq!(Money::from_cents(999).percentage_of(3333).cents(), 333);
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let share = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(share as i64)
    }

    /// Returns the discount amount for this gross value at the given rate.
    ///
    /// Equivalent to `percentage_of(rate.bps())`; exists so call sites read
    /// in domain terms.
    #[inline]
    pub fn discount_at(&self, rate: DiscountRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// This is the order-level guarantee: a coupon larger than the subtotal
    /// produces a free order, never a negative total.
    ///
    /// ```rust
    /// use signcraft_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000);
    /// let coupon = Money::from_cents(15000);
    /// assert_eq!(subtotal.sub_floor_zero(coupon).cents(), 0);
    /// ```
    #[inline]
    pub const fn sub_floor_zero(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        Money(if diff < 0 { 0 } else { diff })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. The frontend formats currency itself (locale
/// aware); this is for logs and test assertions.
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_of_exact() {
        // 25% of $100.00 = $25.00
        assert_eq!(Money::from_cents(10000).percentage_of(2500).cents(), 2500);
    }

    #[test]
    fn test_percentage_of_rounds_half_up() {
        // 12.5% of $0.99 = 12.375 cents -> 12 cents
        assert_eq!(Money::from_cents(99).percentage_of(1250).cents(), 12);
        // 50% of $0.01 = 0.5 cents -> 1 cent
        assert_eq!(Money::from_cents(1).percentage_of(5000).cents(), 1);
    }

    #[test]
    fn test_percentage_of_large_amount_no_overflow() {
        // Several billion dollars at 99.99% must not overflow i64 math
        let huge = Money::from_cents(900_000_000_000);
        assert_eq!(huge.percentage_of(9999).cents(), 899_910_000_000);
    }

    #[test]
    fn test_discount_at() {
        let gross = Money::from_cents(4800);
        let rate = DiscountRate::from_bps(2500);
        assert_eq!(gross.discount_at(rate).cents(), 1200);
    }

    #[test]
    fn test_sub_floor_zero() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.sub_floor_zero(Money::from_cents(4000)).cents(), 6000);
        assert_eq!(subtotal.sub_floor_zero(Money::from_cents(15000)).cents(), 0);
        assert_eq!(subtotal.sub_floor_zero(subtotal).cents(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
