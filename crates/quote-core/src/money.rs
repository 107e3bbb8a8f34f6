//! # Money Module
//!
//! Provides the `Money` and `Multiplier` types for quotation arithmetic.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE PRECISION PROBLEM                                                  │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents are not enough either:                                   │
//! │    $10.15 × 3 seats × 0.90 = $27.405  → a fraction of a cent           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, rounded once at presentation            │
//! │    Every line keeps its fractional cents while the quote is summed,    │
//! │    and only the final figures are rounded to 2 places                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::money::{Money, Multiplier};
//! use rust_decimal_macros::dec;
//!
//! let price = Money::from_cents(1015);              // $10.15
//! let seats = price.times_quantity(3).unwrap();     // $30.45
//! let tiered = seats.scaled_by(Multiplier::new(dec!(0.90)).unwrap()).unwrap();
//!
//! assert_eq!(tiered.amount(), dec!(27.405));
//! assert_eq!(tiered.to_fixed_2(), "27.41");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the quote currency, at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal (signed)**: intermediate values may carry fractional cents
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serialized as a string**: no float round trip on the wire
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  CatalogItem.unit_price ──► × quantity ──► × tier multiplier           │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │  subtotal ──► × (1 − volume discount) ──► final price ──► ÷ seats      │
/// │                                                                         │
/// │  Rounded to 2 places ONLY in QuoteSummary                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_cents(1099).amount(), dec!(10.99));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies by a seat count. `None` on decimal overflow.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.times_quantity(3).unwrap(), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn times_quantity(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Applies a tier multiplier. `None` on decimal overflow.
    #[inline]
    pub fn scaled_by(&self, multiplier: Multiplier) -> Option<Money> {
        self.0.checked_mul(multiplier.value()).map(Money)
    }

    /// Adds two amounts, `None` on decimal overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Removes a discount expressed as a fraction (`0.25` = 25% off).
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// assert_eq!(subtotal.less_fraction(dec!(0.10)).to_fixed_2(), "90.00");
    /// ```
    pub fn less_fraction(&self, fraction: Decimal) -> Money {
        Money(self.0 * (Decimal::ONE - fraction))
    }

    /// Splits the amount evenly across `qty` seats; zero when `qty <= 0`.
    pub fn per_unit(&self, qty: i64) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        Money(self.0 / Decimal::from(qty))
    }

    /// Rounds to whole cents, halves away from zero.
    ///
    /// ## Why Away From Zero?
    /// Quotes have always been displayed with JavaScript-style `toFixed(2)`,
    /// which rounds `0.125` to `0.13`. Sales staff compare against old
    /// printouts, so the display rule stays the same.
    pub fn round_cents(&self) -> Money {
        Money(round_2dp(self.0))
    }

    /// The amount as a fixed two-decimal string (`"436.29"`), no symbol.
    pub fn to_fixed_2(&self) -> String {
        fixed_2(self.0)
    }
}

/// Rounds a decimal to 2 places, halves away from zero.
pub(crate) fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a decimal with exactly two fractional digits.
pub(crate) fn fixed_2(value: Decimal) -> String {
    let mut rounded = round_2dp(value);
    rounded.rescale(2);
    rounded.to_string()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the text renderer. Front ends format with
/// their own locale rules.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round_2dp(self.0);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${}", sign, fixed_2(rounded.abs()))
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Multiplier
// =============================================================================

/// Per-unit price multiplier from a volume tier (`0.90` = 10% off list).
///
/// Never negative. Values above `1.00` are allowed (a surcharge tier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[ts(export)]
pub struct Multiplier(#[ts(type = "string")] Decimal);

impl Multiplier {
    /// Full list price; also the fallback when no tier matches.
    pub const FULL_PRICE: Multiplier = Multiplier(dec!(1.00));

    /// Creates a multiplier, rejecting negative values.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::Negative {
                field: "multiplier".to_string(),
            });
        }
        Ok(Multiplier(value))
    }

    /// Returns the multiplier value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Multiplier {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Multiplier::new(value)
    }
}

impl From<Multiplier> for Decimal {
    fn from(m: Multiplier) -> Self {
        m.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::FULL_PRICE
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
