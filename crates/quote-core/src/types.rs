//! # Domain Types
//!
//! Core domain types used throughout Course Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │  VolumeTier     │   │ QuotationLine   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  min_quantity   │   │  catalog_item_id│       │
//! │  │  name           │   │  max_quantity?  │   │  quantity       │       │
//! │  │  unit_price     │   │  multiplier     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │                     │                     │                 │
//! │           └─────────────────────┼─────────────────────┘                 │
//! │                                 ▼                                       │
//! │                    ┌─────────────────────────┐                          │
//! │                    │  QuoteResult            │  full precision          │
//! │                    │  └─► QuoteSummary       │  2-decimal strings       │
//! │                    └─────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Snapshot files written by the admin tool use `price`, `minUsers`,
//! `maxUsers`, `pricePerLicense`, `courseId` and `users`. Those names are
//! accepted as aliases; output always uses the camelCase field names below.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::discount::DiscountRate;
use crate::error::TierGapWarning;
use crate::money::{Money, Multiplier};

// =============================================================================
// Catalog Item Id
// =============================================================================

/// Stable identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CatalogItemId(u64);

impl CatalogItemId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        CatalogItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CatalogItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(CatalogItemId)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A course available for quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique, stable identifier.
    pub id: CatalogItemId,

    /// Display name shown to the sales user.
    pub name: String,

    /// List price per seat, never negative.
    #[serde(alias = "price")]
    pub unit_price: Money,
}

// =============================================================================
// Volume Tier
// =============================================================================

/// A quantity range with its per-seat price multiplier.
///
/// Both bounds are inclusive; `max_quantity = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTier {
    #[serde(alias = "minUsers")]
    pub min_quantity: i64,

    #[serde(alias = "maxUsers", default)]
    pub max_quantity: Option<i64>,

    #[serde(alias = "pricePerLicense")]
    pub unit_multiplier: Multiplier,
}

impl VolumeTier {
    /// Creates a tier covering `min..=max` (or `min..` when `max` is `None`).
    pub fn new(min_quantity: i64, max_quantity: Option<i64>, unit_multiplier: Multiplier) -> Self {
        VolumeTier {
            min_quantity,
            max_quantity,
            unit_multiplier,
        }
    }

    /// Checks whether `quantity` falls inside this tier.
    ///
    /// ## Boundaries
    /// ```text
    /// tier (100, 499):   99 ✗   100 ✓   499 ✓   500 ✗
    /// tier (10000, ∞):   9999 ✗   10000 ✓   1_000_000 ✓
    /// ```
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Returns true if the tier has no upper bound.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_quantity.is_none()
    }
}

impl fmt::Display for VolumeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_quantity {
            Some(max) => write!(f, "{}-{} ×{}", self.min_quantity, max, self.unit_multiplier),
            None => write!(f, "{}+ ×{}", self.min_quantity, self.unit_multiplier),
        }
    }
}

// =============================================================================
// Quotation Line Item
// =============================================================================

/// One requested (course, seats) pair.
///
/// Quantity is signed so that a bad request (`0`, `-3`) can be received
/// and rejected with a proper error rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLineItem {
    #[serde(alias = "courseId")]
    pub catalog_item_id: CatalogItemId,

    #[serde(alias = "users")]
    pub quantity: i64,
}

impl QuotationLineItem {
    pub fn new(catalog_item_id: CatalogItemId, quantity: i64) -> Self {
        QuotationLineItem {
            catalog_item_id,
            quantity,
        }
    }
}

// =============================================================================
// Quote Result
// =============================================================================

/// How one line was priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotedLine {
    pub catalog_item_id: CatalogItemId,
    /// Item name at quoting time (frozen).
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub multiplier: Multiplier,
    /// Index of the matched tier; `None` means the fallback was used.
    pub tier_index: Option<usize>,
    /// `unit_price × quantity × multiplier`, unrounded.
    pub line_total: Money,
}

/// Full-precision outcome of a quote computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub lines: Vec<QuotedLine>,
    /// Seats summed across every line.
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: DiscountRate,
    pub final_price: Money,
    pub unit_price_effective: Money,
    pub warnings: Vec<TierGapWarning>,
}

impl QuoteResult {
    /// Rounds the result into the four display fields.
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            subtotal: self.subtotal.to_fixed_2(),
            discount_applied: self.discount.percentage_string(),
            final_price: self.final_price.to_fixed_2(),
            unit_price: self.unit_price_effective.to_fixed_2(),
        }
    }

    /// Returns true if any line fell outside every tier.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// The record a presentation layer renders.
///
/// ```json
/// {
///   "subtotal": "500.00",
///   "discountApplied": "12.74%",
///   "finalPrice": "436.29",
///   "unitPrice": "8.73"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub subtotal: String,
    pub discount_applied: String,
    pub final_price: String,
    pub unit_price: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
