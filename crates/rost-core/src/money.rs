//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! offer-price rule used by the storefront discount listings.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All prices are stored and compared as whole cents (bani).           │
//! │    Only the UI converts to a decimal amount for display.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rost_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(4599); // 45.99 lei
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.cents(), 5099);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (bani for RON).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use rost_core::money::Money;
    ///
    /// let price = Money::from_cents(4599); // 45.99 lei
    /// assert_eq!(price.cents(), 4599);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (lei) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (bani) portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Offer Rule
// =============================================================================

/// Decides whether a discounted price qualifies as a storefront offer.
///
/// ## The Rule
/// A product appears in `/api/products/offers` when its discounted price is
/// ALL of:
/// 1. present (non-null)
/// 2. greater than zero
/// 3. strictly less than the regular price
///
/// ## Example
/// ```rust
/// use rost_core::money::{is_offer, Money};
///
/// let regular = Money::from_cents(1000);
///
/// assert!(is_offer(regular, Some(Money::from_cents(799))));
/// assert!(!is_offer(regular, Some(Money::from_cents(1000)))); // not strictly less
/// assert!(!is_offer(regular, Some(Money::zero())));           // not positive
/// assert!(!is_offer(regular, None));                          // no discount at all
/// ```
pub fn is_offer(regular: Money, discounted: Option<Money>) -> bool {
    match discounted {
        Some(d) => d.is_positive() && d < regular,
        None => false,
    }
}

/// Returns the discount as a whole percentage of the regular price.
///
/// Returns `None` when the pair does not qualify as an offer, so callers
/// never render a "-0%" badge.
///
/// ## Example
/// ```rust
/// use rost_core::money::{discount_percent, Money};
///
/// let pct = discount_percent(Money::from_cents(1000), Some(Money::from_cents(750)));
/// assert_eq!(pct, Some(25));
/// ```
pub fn discount_percent(regular: Money, discounted: Option<Money>) -> Option<u32> {
    if !is_offer(regular, discounted) {
        return None;
    }
    let d = discounted?;
    // i128 to keep the intermediate product safe for large prices
    let pct = ((regular.cents() - d.cents()) as i128 * 100) / regular.cents() as i128;
    Some(pct as u32)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The storefront formats prices itself
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} lei", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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
        let money = Money::from_cents(4599);
        assert_eq!(money.cents(), 4599);
        assert_eq!(money.major(), 45);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4599)), "45.99 lei");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00 lei");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50 lei");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00 lei");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    #[test]
    fn test_offer_requires_all_three_conditions() {
        let regular = Money::from_cents(1000);

        // Qualifying discount
        assert!(is_offer(regular, Some(Money::from_cents(999))));

        // Missing discount
        assert!(!is_offer(regular, None));

        // Zero and negative discounts
        assert!(!is_offer(regular, Some(Money::zero())));
        assert!(!is_offer(regular, Some(Money::from_cents(-100))));

        // Equal and higher than regular
        assert!(!is_offer(regular, Some(Money::from_cents(1000))));
        assert!(!is_offer(regular, Some(Money::from_cents(1200))));
    }

    #[test]
    fn test_discount_percent() {
        let regular = Money::from_cents(1000);

        assert_eq!(discount_percent(regular, Some(Money::from_cents(750))), Some(25));
        assert_eq!(discount_percent(regular, Some(Money::from_cents(999))), Some(0));
        assert_eq!(discount_percent(regular, Some(Money::from_cents(1000))), None);
        assert_eq!(discount_percent(regular, None), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
    }
}
