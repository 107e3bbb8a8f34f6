//! # Validation Module
//!
//! Input validation utilities for Course Quote.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                              │
//! │  └── Types and field names                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Business rules (positive seats, non-negative prices)              │
//! │  └── Runs before any pricing: no partial results on failure            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::validation::{validate_item_name, validate_quantity};
//!
//! validate_item_name("Secure Coding 101").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CatalogItemId, QuotationLineItem};
use crate::MAX_ITEM_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_ITEM_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a seat quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// There is no upper limit: large enterprise deals (10,000+ seats) are
/// exactly what the discount cap is for.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
            value: qty,
        });
    }

    Ok(())
}

/// Validates a catalog unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free courses)
///
/// ## Example
/// ```rust
/// use quote_core::money::Money;
/// use quote_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a whole quotation request before pricing.
///
/// ## Rules
/// - At least one line
/// - Every line has a positive quantity
///
/// Catalog membership is checked by the calculator itself, since only it
/// holds the catalog snapshot.
pub fn validate_line_items(lines: &[QuotationLineItem]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Empty {
            field: "line items".to_string(),
        });
    }

    for (index, line) in lines.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("line {index} quantity"),
                value: line.quantity,
            });
        }
    }

    Ok(())
}

/// Parses a `<id>:<quantity>` pair, as typed on the command line.
///
/// ## Example
/// ```rust
/// use quote_core::validation::parse_line_item;
///
/// let line = parse_line_item("17:250").unwrap();
/// assert_eq!(line.catalog_item_id.get(), 17);
/// assert_eq!(line.quantity, 250);
/// ```
pub fn parse_line_item(input: &str) -> ValidationResult<QuotationLineItem> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "line item".to_string(),
        reason: format!("{reason} in '{input}', expected <id>:<quantity>"),
    };

    let (id, qty) = input
        .split_once(':')
        .ok_or_else(|| invalid("missing ':'"))?;
    let id: CatalogItemId = id.parse().map_err(|_| invalid("bad id"))?;
    let qty: i64 = qty.trim().parse().map_err(|_| invalid("bad quantity"))?;

    Ok(QuotationLineItem::new(id, qty))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("  Intro  ").unwrap(), "Intro");
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
        assert!(validate_item_name(&"Ñ".repeat(MAX_ITEM_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10_000).is_ok());
        assert!(validate_quantity(5_000_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        let id = CatalogItemId::new(1);
        assert_eq!(
            validate_line_items(&[]),
            Err(ValidationError::Empty {
                field: "line items".to_string()
            })
        );
        assert!(validate_line_items(&[QuotationLineItem::new(id, 3)]).is_ok());
        assert_eq!(
            validate_line_items(&[
                QuotationLineItem::new(id, 3),
                QuotationLineItem::new(id, 0),
            ]),
            Err(ValidationError::MustBePositive {
                field: "line 1 quantity".to_string(),
                value: 0
            })
        );
    }

    #[test]
    fn test_parse_line_item() {
        assert_eq!(
            parse_line_item("3:12").unwrap(),
            QuotationLineItem::new(CatalogItemId::new(3), 12)
        );
        // Sign is kept so the calculator can reject it with a proper error
        assert_eq!(parse_line_item("3:-2").unwrap().quantity, -2);
        assert!(parse_line_item("3").is_err());
        assert!(parse_line_item("x:1").is_err());
        assert!(parse_line_item("3:many").is_err());
    }
}
