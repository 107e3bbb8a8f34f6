//! # quote-core: Pure Pricing Logic for Course Quotes
//!
//! This crate prices course-license quotations. It holds the catalog and
//! tier snapshots, applies per-line tier multipliers and the volume
//! discount, and has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Course Quote Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quote-cli (binary)                           │   │
//! │  │    config ──► snapshot file ──► request ──► json / text output  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Catalog, &TierTable, &[lines]         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   tiers   │  │   quote   │  │ discount  │  │   │
//! │  │   │  Catalog  │  │ TierTable │  │ compute_  │  │  volume_  │  │   │
//! │  │   │           │  │ coverage  │  │   quote   │  │ discount  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • SAME INPUT = SAME QUOTE     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, VolumeTier, QuoteResult, etc.)
//! - [`money`] - Decimal Money and tier Multiplier
//! - [`catalog`] - In-memory course catalog with admin rules
//! - [`tiers`] - Ordered tier table, lookup and coverage diagnostics
//! - [`discount`] - Logarithmic volume discount
//! - [`quote`] - The price calculator
//! - [`draft`] - Sales-side quotation assembly
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: quoting reads snapshots and never mutates them
//! 2. **No I/O**: loading snapshots is the caller's job
//! 3. **Decimal Money**: full precision until the summary rounds to cents
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use quote_core::{compute_quote, Catalog, Money, QuotationDraft, TierTable};
//!
//! let mut catalog = Catalog::new();
//! let intro = catalog.add("Intro to Rust", Money::from_cents(1000)).unwrap().clone();
//!
//! let mut draft = QuotationDraft::new();
//! draft.add_item(&intro, 120).unwrap();
//!
//! let quote = compute_quote(&draft.line_items(), &catalog, &TierTable::default_schedule()).unwrap();
//!
//! // 120 seats land in the 100-499 tier (×0.90)
//! assert_eq!(quote.summary().subtotal, "1080.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod discount;
pub mod draft;
pub mod error;
pub mod money;
pub mod quote;
pub mod tiers;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quote_core::Money` instead of
// `use quote_core::money::Money`

pub use catalog::Catalog;
pub use discount::{volume_discount, DiscountRate};
pub use draft::{DraftLine, QuotationDraft};
pub use error::{CoreResult, QuoteError, TierGapWarning, ValidationError};
pub use money::{Money, Multiplier};
pub use quote::compute_quote;
pub use tiers::{CoverageIssue, RawTier, TierMatch, TierTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a catalog item name, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 200;
