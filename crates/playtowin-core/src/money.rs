//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 10% discount on 333.33 computed in floats drifts by fractions of    │
//! │  a cent, and carts summed in different orders disagree.                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    33333 cents × 10% = 3333.3 → 3333 cents (rounded once, explicitly)  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use playtowin_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//!
//! let doubled = price * 2;                     // 21.98
//! let total = price + Money::from_cents(500);  // 15.99
//! assert_eq!(total.cents(), 1599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents / satang).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results may go negative before clamping
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a bare integer of cents
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartItem.unit_price ──► CartItem.total_price
///                                                        │
///                                   subtotal = Σ total_price
///                                                        │
///                                      DiscountStrategy::apply ──► final price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Saturates instead of overflowing, so absurd inputs (a loyalty balance
    /// of `i64::MAX` points) still produce a comparable value.
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(500).cents(), 50_000);
    /// ```
    #[inline]
    pub const fn from_major(units: i64) -> Self {
        Money(units.saturating_mul(100))
    }

    /// Converts a decimal amount in major units to cents, rounding to the
    /// nearest cent.
    ///
    /// Only for values arriving as text at the API boundary. The sign
    /// survives rounding: a sub-cent amount becomes one cent of the same
    /// sign, never zero. Infinities saturate at the `i64` bounds and NaN maps
    /// to zero.
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(10.99).cents(), 1099);
    /// assert_eq!(Money::from_major_f64(-0.004).cents(), -1);
    /// assert_eq!(Money::from_major_f64(f64::INFINITY).cents(), i64::MAX);
    /// assert_eq!(Money::from_major_f64(f64::NAN).cents(), 0);
    /// ```
    pub fn from_major_f64(amount: f64) -> Self {
        // `as` saturates and sends NaN to 0
        let cents = (amount * 100.0).round() as i64;
        if amount > 0.0 && cents <= 0 {
            Money(1)
        } else if amount < 0.0 && cents >= 0 {
            Money(-1)
        } else {
            Money(cents)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for JSON output only.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `self` or zero, whichever is larger.
    ///
    /// Every discount strategy ends with this clamp.
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).floor_at_zero(), Money::zero());
    /// assert_eq!(Money::from_cents(250).floor_at_zero().cents(), 250);
    /// ```
    #[inline]
    pub fn floor_at_zero(self) -> Self {
        self.max(Money::zero())
    }

    /// Returns the given percentage of this amount, rounded half away from
    /// zero to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `(cents × bps ± 5000) / 10000`
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    /// use playtowin_core::types::Percentage;
    ///
    /// let subtotal = Money::from_cents(1000);
    /// // 10.00 × 8.25% = 0.825 → 0.83
    /// assert_eq!(subtotal.percentage_of(Percentage::from_bps(825)).cents(), 83);
    /// ```
    pub fn percentage_of(&self, pct: Percentage) -> Money {
        let product = self.0 as i128 * pct.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money(rounded as i64)
    }

    /// Applies a percentage discount and returns what is left to pay.
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    /// use playtowin_core::types::Percentage;
    ///
    /// let subtotal = Money::from_cents(100_000);
    /// let discounted = subtotal.apply_percentage_discount(Percentage::from_bps(1000));
    /// assert_eq!(discounted.cents(), 90_000);
    /// ```
    pub fn apply_percentage_discount(&self, pct: Percentage) -> Money {
        *self - self.percentage_of(pct)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ```rust
    /// use playtowin_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).checked_mul(4), Some(Money::from_cents(1_000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("850.00"), used in log lines.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_saturates() {
        assert_eq!(Money::from_major(12).cents(), 1200);
        assert_eq!(Money::from_major(i64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn test_from_major_f64() {
        assert_eq!(Money::from_major_f64(1000.0).cents(), 100_000);
        assert_eq!(Money::from_major_f64(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_major_f64(-5.5).cents(), -550);
        assert_eq!(Money::from_major_f64(f64::INFINITY).cents(), i64::MAX);
        assert_eq!(Money::from_major_f64(f64::NEG_INFINITY).cents(), i64::MIN);
        assert_eq!(Money::from_major_f64(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_from_major_f64_keeps_sign_below_a_cent() {
        assert_eq!(Money::from_major_f64(-0.004).cents(), -1);
        assert_eq!(Money::from_major_f64(0.004).cents(), 1);
        assert_eq!(Money::from_major_f64(0.0).cents(), 0);
        assert_eq!(Money::from_major_f64(-0.0).cents(), 0);
    }

    #[test]
    fn test_checked_ops() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(
            Money::from_cents(40).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(42))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(85_000).to_string(), "850.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_rounding() {
        let amount = Money::from_cents(1000);
        assert_eq!(amount.percentage_of(Percentage::from_bps(1000)).cents(), 100);
        assert_eq!(amount.percentage_of(Percentage::from_bps(825)).cents(), 83);
        assert_eq!(amount.percentage_of(Percentage::from_bps(0)).cents(), 0);
        assert_eq!(amount.percentage_of(Percentage::from_bps(10_000)).cents(), 1000);

        // 0.005 rounds away from zero on both sides
        assert_eq!(Money::from_cents(1).percentage_of(Percentage::from_bps(5000)).cents(), 1);
        assert_eq!(Money::from_cents(-1).percentage_of(Percentage::from_bps(5000)).cents(), -1);
    }

    #[test]
    fn test_floor_at_zero() {
        assert!(Money::from_cents(-1).floor_at_zero().is_zero());
        assert_eq!(Money::from_cents(7).floor_at_zero().cents(), 7);
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Money::from_cents(1234)).unwrap();
        assert_eq!(json, "1234");
        let back: Money = serde_json::from_str("99").unwrap();
        assert_eq!(back.cents(), 99);
    }
}
