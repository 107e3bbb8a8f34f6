//! # Volume Discount
//!
//! The order-level discount applied on top of per-line tier pricing.
//!
//! ## The Curve
//! ```text
//! discount
//!   60% ┤                                         ●━━━━━━━━━━━━━  cap
//!       │                                  ___----
//!   45% ┤                        ___-------
//!       │               ___------
//!   30% ┤        ___----
//!       │    _---
//!   15% ┤  _-
//!       │ /
//!    0% ●─┴────────┬────────┬────────┬────────┬──────────────────► seats
//!       1         10      100     1000    10000
//!
//!   seats ≤ 0        → 0%
//!   1 ≤ seats < 10k  → min(log10(seats) × 7.5%, 60%)
//!   seats ≥ 10k      → 60%
//! ```
//!
//! The discount depends only on the total seat count of the whole quote. It
//! multiplies the tier-priced subtotal; it never replaces a tier multiplier.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::fixed_2;

/// Seat count at and above which the cap applies outright.
pub const DISCOUNT_CAP_QUANTITY: i64 = 10_000;

/// Discount fraction gained per decade of seats.
pub const DISCOUNT_PER_DECADE: f64 = 0.075;

/// Largest discount any quote can receive.
pub const MAX_DISCOUNT: DiscountRate = DiscountRate(dec!(0.60));

/// A discount as a fraction of the subtotal (`0.25` = 25% off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct DiscountRate(#[ts(type = "string")] Decimal);

impl DiscountRate {
    /// No discount.
    pub const NONE: DiscountRate = DiscountRate(Decimal::ZERO);

    /// Returns the discount as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns true if nothing is discounted.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Percentage with two decimals and a percent sign, e.g. `"12.74%"`.
    pub fn percentage_string(&self) -> String {
        format!("{}%", fixed_2(self.0 * dec!(100)))
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.percentage_string())
    }
}

/// Computes the volume discount for a quote's total seat count.
///
/// ## Example
/// ```rust
/// use quote_core::discount::{volume_discount, MAX_DISCOUNT};
///
/// assert!(volume_discount(1).is_zero());
/// assert_eq!(volume_discount(50).percentage_string(), "12.74%");
/// assert_eq!(volume_discount(10_000), MAX_DISCOUNT);
/// ```
pub fn volume_discount(total_quantity: i64) -> DiscountRate {
    if total_quantity <= 0 {
        return DiscountRate::NONE;
    }
    if total_quantity >= DISCOUNT_CAP_QUANTITY {
        return MAX_DISCOUNT;
    }

    let raw = (total_quantity as f64).log10() * DISCOUNT_PER_DECADE;
    // log10 of a positive integer is always finite
    let fraction = Decimal::from_f64(raw).unwrap_or(Decimal::ZERO);
    DiscountRate(fraction.min(MAX_DISCOUNT.0))
}

// =============================================================================
// Unit Tests
// =============================================================================
