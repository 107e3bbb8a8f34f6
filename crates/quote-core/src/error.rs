//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── QuoteError       - Fatal: the quote (or admin action) is rejected │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  └── TierGapWarning   - NOT an error: the quote still succeeds         │
//! │                                                                         │
//! │  quote-cli errors (app)                                                │
//! │  └── ApiError         - What the caller sees (code + message)          │
//! │                                                                         │
//! │  Flow: ValidationError → QuoteError → ApiError → caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field name)
//! 3. Errors are enum variants, never String
//! 4. A fatal error never carries a partial result

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::money::Multiplier;
use crate::types::CatalogItemId;

// =============================================================================
// Quote Error
// =============================================================================

/// Errors raised by quote computation and catalog/tier administration.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Malformed input rejected before any computation starts.
    ///
    /// ## When This Occurs
    /// - Empty line-item list
    /// - Quantity of zero or less
    /// - Admin input with a blank name or a negative price
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// A line item or admin action references an id the catalog lacks.
    ///
    /// ## User Workflow
    /// ```text
    /// Quote [(course 42, 5 seats)]
    ///      │
    ///      ▼
    /// catalog.get(42) → None
    ///      │
    ///      ▼
    /// ItemNotFound(42)  (no subtotal is produced)
    /// ```
    #[error("Catalog item not found: {0}")]
    ItemNotFound(CatalogItemId),

    /// A snapshot tried to load two items with the same id.
    #[error("Catalog item {0} already exists")]
    DuplicateItem(CatalogItemId),
}

impl QuoteError {
    /// Machine-readable kind, stable across message wording changes.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput(_) => "INVALID_INPUT",
            QuoteError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            QuoteError::DuplicateItem(_) => "DUPLICATE_ITEM",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that must contain something is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Arithmetic on the input would exceed what a decimal can hold.
    #[error("{field} is too large to compute")]
    Overflow { field: String },

    /// Invalid format (e.g. a line item that isn't `id:quantity`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Tier Gap Warning
// =============================================================================

/// A line whose quantity matched no volume tier.
///
/// The line is priced at [`Multiplier::FULL_PRICE`] and the quote proceeds.
/// Collected on the quote result and logged at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TierGapWarning {
    /// Position of the line in the request (0-based).
    pub line_index: usize,
    pub catalog_item_id: CatalogItemId,
    pub quantity: i64,
    /// Multiplier used instead of a tier multiplier.
    pub fallback_multiplier: Multiplier,
}

impl std::fmt::Display for TierGapWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no volume tier covers {} units of item {} (line {}); using multiplier {}",
            self.quantity, self.catalog_item_id, self.line_index, self.fallback_multiplier
        )
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with QuoteError.
pub type CoreResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================
