//! # Money Module
//!
//! Provides the `Money` type for prices, costs and margin amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Summing hundreds of order-line margins in f64 drifts. Every amount    │
//! │  here is an integer count of the currency's minor unit (cents, sen).   │
//! │  Only quantities (kg, litres, units) and percentages are floats.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockmark_core::money::Money;
//!
//! let cost = Money::from_minor(100_000);
//! let price = Money::from_minor(150_000);
//! assert_eq!((price - cost).minor(), 50_000);
//! ```
//!
//! Arithmetic saturates at the `i64` bounds instead of overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: margins go negative when a product sells below cost,
///   and malformed upstream costs may be negative too
/// - **Newtype**: serializes as a bare integer in host payloads
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use stockmark_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
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

    /// Checks if the value is strictly positive.
    ///
    /// This is the markup guard: only a positive cost is a valid divisor.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `self / base * 100`, or `None` when `base` is not positive.
    ///
    /// ## Example
    /// ```rust
    /// use stockmark_core::money::Money;
    ///
    /// let margin = Money::from_minor(50_000);
    /// assert_eq!(margin.percent_of(Money::from_minor(100_000)), Some(50.0));
    /// assert_eq!(margin.percent_of(Money::zero()), None);
    /// ```
    pub fn percent_of(&self, base: Money) -> Option<f64> {
        if !base.is_positive() {
            return None;
        }
        Some(self.0 as f64 / base.0 as f64 * 100.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol.
///
/// Currency formatting belongs to the POS frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}


// =============================================================================
// Unit Tests
// =============================================================================
