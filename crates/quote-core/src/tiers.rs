//! # Volume Tier Table
//!
//! Per-line bulk pricing: each line's seat count picks a multiplier.
//!
//! ## Lookup Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find(quantity)                                                         │
//! │                                                                         │
//! │  for tier in table (in stored order):                                  │
//! │      if tier.min ≤ quantity ≤ tier.max (max None = ∞):                  │
//! │          return tier            ← FIRST match wins, even if a later    │
//! │                                   tier also matches                    │
//! │  return None                    ← caller prices at ×1.00 and warns     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is never re-sorted and never rejected for gaps or overlaps.
//! [`TierTable::coverage_issues`] reports them so an admin can fix the table,
//! but quoting keeps working with whatever was configured.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Multiplier;
use crate::types::VolumeTier;

// =============================================================================
// Tier Table
// =============================================================================

/// An ordered list of volume tiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<VolumeTier>,
}

/// Result of a tier lookup for one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch {
    pub multiplier: Multiplier,
    /// `None` when no tier matched and the fallback applies.
    pub tier_index: Option<usize>,
}

impl TierMatch {
    /// Returns true if the fallback multiplier was used.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.tier_index.is_none()
    }
}

impl TierTable {
    /// Wraps tiers as given. Order is kept; nothing is validated.
    pub fn new(tiers: Vec<VolumeTier>) -> Self {
        TierTable { tiers }
    }

    /// The schedule a fresh installation starts with.
    ///
    /// ```text
    ///      1 –    99   ×1.00
    ///    100 –   499   ×0.90
    ///    500 –   999   ×0.80
    ///   1000 –  4999   ×0.70
    ///   5000 –  9999   ×0.60
    ///  10000 +         ×0.50
    /// ```
    pub fn default_schedule() -> Self {
        const SCHEDULE: [(i64, Option<i64>, Decimal); 6] = [
            (1, Some(99), dec!(1.00)),
            (100, Some(499), dec!(0.90)),
            (500, Some(999), dec!(0.80)),
            (1000, Some(4999), dec!(0.70)),
            (5000, Some(9999), dec!(0.60)),
            (10000, None, dec!(0.50)),
        ];

        TierTable::new(
            SCHEDULE
                .iter()
                .filter_map(|&(min, max, m)| {
                    Multiplier::new(m).ok().map(|m| VolumeTier::new(min, max, m))
                })
                .collect(),
        )
    }

    /// Builds a replacement table from admin-submitted ranges.
    ///
    /// ## Rules
    /// - `minUsers` and `pricePerLicense` are required
    /// - neither may be negative
    /// - a missing or zero `maxUsers` means "no upper bound" (a blank field
    ///   in the admin form submits 0)
    /// - a negative `maxUsers` is rejected
    ///
    /// The whole table is rejected if any range is invalid.
    pub fn replace_from(ranges: &[RawTier]) -> Result<Self, ValidationError> {
        ranges
            .iter()
            .enumerate()
            .map(|(i, raw)| raw.to_tier(i))
            .collect::<Result<Vec<_>, _>>()
            .map(TierTable::new)
    }

    /// Finds the first tier containing `quantity`.
    pub fn find(&self, quantity: i64) -> Option<(usize, &VolumeTier)> {
        self.tiers
            .iter()
            .enumerate()
            .find(|(_, tier)| tier.contains(quantity))
    }

    /// Multiplier for `quantity`, falling back to full price.
    pub fn multiplier_for(&self, quantity: i64) -> TierMatch {
        match self.find(quantity) {
            Some((index, tier)) => TierMatch {
                multiplier: tier.unit_multiplier,
                tier_index: Some(index),
            },
            None => TierMatch {
                multiplier: Multiplier::FULL_PRICE,
                tier_index: None,
            },
        }
    }

    /// Returns the tiers in stored order.
    pub fn tiers(&self) -> &[VolumeTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Lists everything that keeps the table from partitioning `[1, ∞)`.
    ///
    /// An empty list means every positive quantity hits exactly one tier
    /// and the tiers are stored in ascending order.
    pub fn coverage_issues(&self) -> Vec<CoverageIssue> {
        let mut issues = Vec::new();

        if self.tiers.is_empty() {
            issues.push(CoverageIssue::Empty);
            return issues;
        }

        for (index, tier) in self.tiers.iter().enumerate() {
            if matches!(tier.max_quantity, Some(max) if max < tier.min_quantity) {
                issues.push(CoverageIssue::InvertedRange { index });
            }
        }

        for (index, pair) in self.tiers.windows(2).enumerate() {
            if pair[1].min_quantity < pair[0].min_quantity {
                issues.push(CoverageIssue::OutOfOrder { index: index + 1 });
            }
        }

        for (first, a) in self.tiers.iter().enumerate() {
            for (offset, b) in self.tiers[first + 1..].iter().enumerate() {
                if let Some((from, to)) = intersection(a, b) {
                    issues.push(CoverageIssue::Overlap {
                        first,
                        second: first + 1 + offset,
                        from,
                        to,
                    });
                }
            }
        }

        issues.extend(self.gaps());
        issues
    }

    /// Returns true if every positive quantity matches some tier.
    pub fn covers_all_quantities(&self) -> bool {
        !self.tiers.is_empty() && self.gaps().next().is_none()
    }

    fn gaps(&self) -> impl Iterator<Item = CoverageIssue> {
        let mut sorted: Vec<&VolumeTier> = self
            .tiers
            .iter()
            .filter(|t| t.max_quantity.map_or(true, |max| max >= t.min_quantity))
            .collect();
        sorted.sort_by_key(|t| t.min_quantity);

        let mut gaps = Vec::new();
        // next quantity not yet covered; None once an unbounded tier is reached
        let mut cursor: Option<i64> = Some(1);

        for tier in sorted {
            let Some(next) = cursor else { break };
            if tier.min_quantity > next {
                gaps.push(CoverageIssue::Gap {
                    from: next,
                    to: Some(tier.min_quantity - 1),
                });
            }
            cursor = match tier.max_quantity {
                None => None,
                Some(max) => Some(next.max(max.saturating_add(1))),
            };
        }

        if let Some(from) = cursor {
            gaps.push(CoverageIssue::Gap { from, to: None });
        }

        gaps.into_iter()
    }
}

fn intersection(a: &VolumeTier, b: &VolumeTier) -> Option<(i64, Option<i64>)> {
    let from = a.min_quantity.max(b.min_quantity);
    let to = match (a.max_quantity, b.max_quantity) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    };
    match to {
        Some(to) if to < from => None,
        _ => Some((from, to)),
    }
}

// =============================================================================
// Raw Tier (admin input)
// =============================================================================

/// A tier as submitted by the admin form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTier {
    #[serde(alias = "minUsers", default)]
    pub min_quantity: Option<i64>,

    #[serde(alias = "maxUsers", default)]
    pub max_quantity: Option<i64>,

    #[serde(alias = "pricePerLicense", default)]
    pub unit_multiplier: Option<Decimal>,
}

impl RawTier {
    fn to_tier(&self, index: usize) -> Result<VolumeTier, ValidationError> {
        let min = self.min_quantity.ok_or_else(|| ValidationError::Required {
            field: format!("tiers[{index}].minQuantity"),
        })?;
        if min < 0 {
            return Err(ValidationError::Negative {
                field: format!("tiers[{index}].minQuantity"),
            });
        }

        let max = match self.max_quantity {
            None | Some(0) => None,
            Some(max) if max < 0 => {
                return Err(ValidationError::Negative {
                    field: format!("tiers[{index}].maxQuantity"),
                })
            }
            Some(max) => Some(max),
        };

        let multiplier = self
            .unit_multiplier
            .ok_or_else(|| ValidationError::Required {
                field: format!("tiers[{index}].unitMultiplier"),
            })
            .and_then(|m| {
                Multiplier::new(m).map_err(|_| ValidationError::Negative {
                    field: format!("tiers[{index}].unitMultiplier"),
                })
            })?;

        Ok(VolumeTier::new(min, max, multiplier))
    }
}

// =============================================================================
// Coverage Diagnostics
// =============================================================================

/// Something about a tier table that breaks the ideal partition of `[1, ∞)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CoverageIssue {
    /// No tiers at all: every line falls back to full price.
    Empty,
    /// Quantities `from..=to` (or `from..` when `to` is `None`) match no tier.
    Gap { from: i64, to: Option<i64> },
    /// Two tiers both match `from..=to`; the earlier one wins.
    Overlap {
        first: usize,
        second: usize,
        from: i64,
        to: Option<i64>,
    },
    /// Tier `index` starts below its predecessor.
    OutOfOrder { index: usize },
    /// Tier `index` has `max < min` and can never match.
    InvertedRange { index: usize },
}

fn fmt_range(f: &mut fmt::Formatter<'_>, from: i64, to: Option<i64>) -> fmt::Result {
    match to {
        Some(to) if to == from => write!(f, "{from}"),
        Some(to) => write!(f, "{from}-{to}"),
        None => write!(f, "{from} and above"),
    }
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageIssue::Empty => write!(f, "no tiers configured"),
            CoverageIssue::Gap { from, to } => {
                write!(f, "no tier covers ")?;
                fmt_range(f, *from, *to)
            }
            CoverageIssue::Overlap {
                first,
                second,
                from,
                to,
            } => {
                write!(f, "tiers {first} and {second} overlap on ")?;
                fmt_range(f, *from, *to)?;
                write!(f, " (tier {first} wins)")
            }
            CoverageIssue::OutOfOrder { index } => {
                write!(f, "tier {index} starts below the tier before it")
            }
            CoverageIssue::InvertedRange { index } => {
                write!(f, "tier {index} has max below min and never matches")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
