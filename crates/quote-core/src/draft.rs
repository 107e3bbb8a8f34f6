//! # Quotation Draft
//!
//! The sales-side list of courses being assembled into a quote.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Sales Action             Method                  Draft Change          │
//! │  ────────────             ──────                  ────────────          │
//! │                                                                         │
//! │  Pick course ────────────► add_item() ──────────► push or merge qty    │
//! │                                                                         │
//! │  Change seats ───────────► update_quantity() ───► lines[i].qty = n     │
//! │                                                                         │
//! │  Drop course ────────────► remove_item() ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Start over ─────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Request quote ──────────► line_items() ────────► compute_quote(..)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A draft holds one line per course. Adding a course that is already
//! present increases its seat count, so the tier a line lands in follows
//! the combined seats. `compute_quote` itself never merges.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreResult, QuoteError, ValidationError};
use crate::money::Money;
use crate::types::{CatalogItem, CatalogItemId, QuotationLineItem};
use crate::validation::validate_quantity;

/// One course in the draft.
///
/// Name and price are copied from the catalog when the course is added,
/// for display only. Pricing always re-reads the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub catalog_item_id: CatalogItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

/// A quotation being assembled.
///
/// ## Invariants
/// - Lines are unique by `catalog_item_id`
/// - Every quantity is > 0 (setting a quantity to 0 removes the line)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDraft {
    lines: Vec<DraftLine>,
}

impl QuotationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, or increases its seats if already present.
    pub fn add_item(&mut self, item: &CatalogItem, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.catalog_item_id == item.id)
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::Overflow {
                    field: "quantity".to_string(),
                })?;
            debug!(item_id = %item.id, quantity = line.quantity, "Merged draft line");
            return Ok(());
        }

        self.lines.push(DraftLine {
            catalog_item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
        });
        debug!(item_id = %item.id, quantity, "Added draft line");
        Ok(())
    }

    /// Sets the seat count of a line.
    ///
    /// ## Behavior
    /// - 0 removes the line
    /// - negative quantities are rejected
    /// - a course not in the draft is `ItemNotFound`
    pub fn update_quantity(&mut self, id: CatalogItemId, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(id);
        }
        validate_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.catalog_item_id == id)
            .ok_or(QuoteError::ItemNotFound(id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a course from the draft.
    pub fn remove_item(&mut self, id: CatalogItemId) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.catalog_item_id != id);

        if self.lines.len() == initial_len {
            Err(QuoteError::ItemNotFound(id))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Number of distinct courses.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Seats across all lines.
    pub fn total_quantity(&self) -> CoreResult<i64> {
        self.lines
            .iter()
            .try_fold(0i64, |total, l| total.checked_add(l.quantity))
            .ok_or_else(|| {
                ValidationError::Overflow {
                    field: "total quantity".to_string(),
                }
                .into()
            })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The request to hand to [`compute_quote`](crate::quote::compute_quote).
    pub fn line_items(&self) -> Vec<QuotationLineItem> {
        self.lines
            .iter()
            .map(|l| QuotationLineItem::new(l.catalog_item_id, l.quantity))
            .collect()
    }
}
