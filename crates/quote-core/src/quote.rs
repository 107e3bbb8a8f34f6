//! # Price Calculator
//!
//! Turns a list of (course, seats) lines into a priced quote.
//!
//! ## Two Discounts, Two Granularities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  line 1: Intro × 50   ──► tier(50)  = ×1.00 ──► $10 × 50 × 1.00 = $500 │
//! │  line 2: Ops   × 120  ──► tier(120) = ×0.90 ──► $5 × 120 × 0.90 = $540 │
//! │                  │                                          │           │
//! │                  │  PER LINE: each line's own seat count    │           │
//! │                  ▼                                          ▼           │
//! │  total seats = 170                              subtotal = $1040       │
//! │                  │                                          │           │
//! │                  ▼                                          │           │
//! │  volume_discount(170) = 16.73%  ── WHOLE QUOTE ──────────►  ×           │
//! │                                                             ▼           │
//! │                                         final = $1040 × (1 − 0.1673)   │
//! │                                         unit  = final ÷ 170            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines naming the same course are NOT merged: two lines of 3 and 4 seats
//! are priced at the 3-seat and 4-seat tiers, and contribute 7 seats to the
//! volume discount. Merging is [`QuotationDraft`](crate::draft::QuotationDraft)'s
//! job, before a quote is requested.
//!
//! ## Failure Model
//! Validation and catalog lookup both finish before the first line is
//! priced, so a failed quote never logs a tier warning or yields a partial
//! subtotal.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::discount::volume_discount;
use crate::error::{CoreResult, QuoteError, TierGapWarning, ValidationError};
use crate::money::Money;
use crate::tiers::TierTable;
use crate::types::{CatalogItem, QuotationLineItem, QuoteResult, QuotedLine};
use crate::validation::validate_line_items;

/// Computes a quote for `lines` against a catalog and tier snapshot.
///
/// ## Errors
/// - [`QuoteError::InvalidInput`] for an empty list or a quantity ≤ 0
/// - [`QuoteError::ItemNotFound`] for the first line naming an unknown id
///
/// A line whose seat count matches no tier is priced at full price and
/// reported in [`QuoteResult::warnings`]; it is not an error.
///
/// ## Example
/// ```rust
/// use quote_core::{compute_quote, Catalog, CatalogItemId, Money, QuotationLineItem, TierTable};
///
/// let mut catalog = Catalog::new();
/// let intro = catalog.add("Intro", Money::from_cents(1000)).unwrap().id;
///
/// let quote = compute_quote(
///     &[QuotationLineItem::new(intro, 50)],
///     &catalog,
///     &TierTable::default_schedule(),
/// )
/// .unwrap();
///
/// let summary = quote.summary();
/// assert_eq!(summary.subtotal, "500.00");
/// assert_eq!(summary.discount_applied, "12.74%");
/// assert_eq!(summary.final_price, "436.29");
/// assert_eq!(summary.unit_price, "8.73");
/// ```
pub fn compute_quote(
    lines: &[QuotationLineItem],
    catalog: &Catalog,
    tiers: &TierTable,
) -> CoreResult<QuoteResult> {
    validate_line_items(lines)?;

    let items = lines
        .iter()
        .map(|line| {
            catalog
                .get(line.catalog_item_id)
                .ok_or(QuoteError::ItemNotFound(line.catalog_item_id))
        })
        .collect::<CoreResult<Vec<&CatalogItem>>>()?;

    let mut quoted = Vec::with_capacity(lines.len());
    let mut warnings = Vec::new();
    let mut subtotal = Money::zero();
    let mut total_quantity: i64 = 0;

    for (index, (line, item)) in lines.iter().zip(items).enumerate() {
        total_quantity = total_quantity
            .checked_add(line.quantity)
            .ok_or_else(|| overflow("total quantity"))?;

        let tier = tiers.multiplier_for(line.quantity);
        if tier.is_fallback() {
            let warning = TierGapWarning {
                line_index: index,
                catalog_item_id: item.id,
                quantity: line.quantity,
                fallback_multiplier: tier.multiplier,
            };
            warn!(
                line = index,
                item_id = %item.id,
                quantity = line.quantity,
                "No volume tier matches; pricing line at full price"
            );
            warnings.push(warning);
        }

        let line_total = item
            .unit_price
            .times_quantity(line.quantity)
            .and_then(|m| m.scaled_by(tier.multiplier))
            .ok_or_else(|| overflow("line total"))?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| overflow("subtotal"))?;

        debug!(
            line = index,
            item_id = %item.id,
            quantity = line.quantity,
            multiplier = %tier.multiplier,
            line_total = %line_total,
            "Priced line"
        );

        quoted.push(QuotedLine {
            catalog_item_id: item.id,
            name: item.name.clone(),
            quantity: line.quantity,
            unit_price: item.unit_price,
            multiplier: tier.multiplier,
            tier_index: tier.tier_index,
            line_total,
        });
    }

    let discount = volume_discount(total_quantity);
    let final_price = subtotal.less_fraction(discount.fraction());
    let unit_price_effective = final_price.per_unit(total_quantity);

    debug!(
        total_quantity,
        subtotal = %subtotal,
        discount = %discount,
        final_price = %final_price,
        "Quote computed"
    );

    Ok(QuoteResult {
        lines: quoted,
        total_quantity,
        subtotal,
        discount,
        final_price,
        unit_price_effective,
        warnings,
    })
}

fn overflow(field: &str) -> QuoteError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::MAX_DISCOUNT;
    use crate::money::Multiplier;
    use crate::types::{CatalogItemId, VolumeTier};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tier(min: i64, max: Option<i64>, m: Decimal) -> VolumeTier {
        VolumeTier::new(min, max, Multiplier::new(m).unwrap())
    }

    fn intro_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("Intro", Money::from_cents(1000)).unwrap();
        catalog
    }

    fn two_tiers() -> TierTable {
        TierTable::new(vec![
            tier(1, Some(99), dec!(1.00)),
            tier(100, Some(499), dec!(0.90)),
        ])
    }

    fn line(id: u64, qty: i64) -> QuotationLineItem {
        QuotationLineItem::new(CatalogItemId::new(id), qty)
    }

    #[test]
    fn test_single_line_quote() {
        let quote = compute_quote(&[line(1, 50)], &intro_catalog(), &two_tiers()).unwrap();

        assert_eq!(quote.lines[0].multiplier.value(), dec!(1.00));
        assert_eq!(quote.lines[0].tier_index, Some(0));
        assert_eq!(quote.subtotal, Money::from_cents(50000));
        assert_eq!(quote.total_quantity, 50);
        assert!(!quote.has_warnings());

        let summary = quote.summary();
        assert_eq!(summary.subtotal, "500.00");
        assert_eq!(summary.discount_applied, "12.74%");
        assert_eq!(summary.final_price, "436.29");
        assert_eq!(summary.unit_price, "8.73");
    }

    #[test]
    fn test_same_item_lines_are_priced_separately() {
        let tiers = TierTable::new(vec![
            tier(1, Some(3), dec!(1.00)),
            tier(4, None, dec!(0.50)),
        ]);
        let quote = compute_quote(&[line(1, 3), line(1, 4)], &intro_catalog(), &tiers).unwrap();

        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].tier_index, Some(0));
        assert_eq!(quote.lines[1].tier_index, Some(1));
        assert_eq!(quote.total_quantity, 7);
        // 10×3×1.00 + 10×4×0.50, not 10×7×0.50
        assert_eq!(quote.subtotal, Money::from_cents(5000));
    }

    #[test]
    fn test_tier_uses_line_quantity_not_running_total() {
        let quote =
            compute_quote(&[line(1, 60), line(1, 60)], &intro_catalog(), &two_tiers()).unwrap();

        assert!(quote.lines.iter().all(|l| l.multiplier.value() == dec!(1.00)));
        assert_eq!(quote.total_quantity, 120);
        assert_eq!(quote.subtotal, Money::from_cents(120000));
    }

    #[test]
    fn test_empty_request_is_invalid() {
        let err = compute_quote(&[], &intro_catalog(), &two_tiers()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::InvalidInput(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_non_positive_quantity_is_invalid() {
        for qty in [0, -4] {
            let err = compute_quote(&[line(1, qty)], &intro_catalog(), &two_tiers()).unwrap_err();
            assert!(matches!(
                err,
                QuoteError::InvalidInput(ValidationError::MustBePositive { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_item_names_the_id() {
        let err = compute_quote(&[line(1, 2), line(404, 5)], &intro_catalog(), &two_tiers())
            .unwrap_err();
        assert!(matches!(err, QuoteError::ItemNotFound(id) if id.get() == 404));
    }

    #[test]
    fn test_validation_runs_before_lookup() {
        let err = compute_quote(&[line(404, 5), line(1, 0)], &intro_catalog(), &two_tiers())
            .unwrap_err();
        assert!(matches!(err, QuoteError::InvalidInput(_)));
    }

    #[test]
    fn test_tier_gap_falls_back_to_full_price() {
        let quote = compute_quote(&[line(1, 600)], &intro_catalog(), &two_tiers()).unwrap();

        assert_eq!(quote.lines[0].multiplier, Multiplier::FULL_PRICE);
        assert_eq!(quote.lines[0].tier_index, None);
        assert_eq!(quote.subtotal, Money::from_cents(600000));
        assert_eq!(
            quote.warnings,
            vec![TierGapWarning {
                line_index: 0,
                catalog_item_id: CatalogItemId::new(1),
                quantity: 600,
                fallback_multiplier: Multiplier::FULL_PRICE,
            }]
        );
    }

    #[test]
    fn test_single_seat_has_no_discount() {
        let quote = compute_quote(&[line(1, 1)], &intro_catalog(), &two_tiers()).unwrap();
        assert!(quote.discount.is_zero());
        assert_eq!(quote.final_price, quote.subtotal);
        assert_eq!(quote.unit_price_effective, Money::from_cents(1000));
    }

    #[test]
    fn test_cap_at_exactly_ten_thousand_seats() {
        let quote = compute_quote(
            &[line(1, 4000), line(1, 6000)],
            &intro_catalog(),
            &TierTable::default_schedule(),
        )
        .unwrap();

        assert_eq!(quote.total_quantity, 10_000);
        assert_eq!(quote.discount, MAX_DISCOUNT);
        // 10×4000×0.70 + 10×6000×0.60 = 64000, × 0.40
        assert_eq!(quote.subtotal, Money::from_cents(6_400_000));
        assert_eq!(quote.summary().final_price, "25600.00");
        assert_eq!(quote.summary().unit_price, "2.56");
    }

    #[test]
    fn test_full_precision_until_summary() {
        let mut catalog = Catalog::new();
        catalog.add("Odd", Money::from_cents(1015)).unwrap();
        let tiers = TierTable::new(vec![tier(1, None, dec!(0.90))]);

        let quote = compute_quote(&[line(1, 3), line(1, 3)], &catalog, &tiers).unwrap();

        // 2 × 27.405; rounding each line first would give 54.82
        assert_eq!(quote.subtotal.amount(), dec!(54.810));
        assert_eq!(quote.summary().subtotal, "54.81");
    }

    #[test]
    fn test_quote_is_idempotent() {
        let catalog = intro_catalog();
        let tiers = TierTable::default_schedule();
        let lines = [line(1, 150), line(1, 7)];

        let first = compute_quote(&lines, &catalog, &tiers).unwrap();
        let second = compute_quote(&lines, &catalog, &tiers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_quotes_share_snapshots() {
        let catalog = intro_catalog();
        let tiers = TierTable::default_schedule();
        let expected = compute_quote(&[line(1, 250)], &catalog, &tiers).unwrap();

        let (catalog, tiers) = (&catalog, &tiers);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || compute_quote(&[line(1, 250)], catalog, tiers).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_free_course_quotes_zero() {
        let mut catalog = Catalog::new();
        catalog.add("Free", Money::zero()).unwrap();
        let quote = compute_quote(&[line(1, 25)], &catalog, &two_tiers()).unwrap();

        let summary = quote.summary();
        assert_eq!(summary.subtotal, "0.00");
        assert_eq!(summary.final_price, "0.00");
        assert_eq!(summary.unit_price, "0.00");
    }

    #[test]
    fn test_overflow_is_invalid_input() {
        let mut catalog = Catalog::new();
        catalog.add("Huge", Money::new(Decimal::MAX)).unwrap();
        let err = compute_quote(&[line(1, 2)], &catalog, &two_tiers()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::InvalidInput(ValidationError::Overflow { .. })
        ));
    }
}
