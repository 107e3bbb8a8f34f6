//! # Catalog
//!
//! The in-memory course catalog the calculator prices against.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Admin                         Catalog                 Calculator      │
//! │  ─────                         ───────                 ──────────      │
//! │  add("Intro", $10) ─────────► id 1 assigned                            │
//! │  update(1, price $12) ──────► item replaced                            │
//! │  remove(1) ─────────────────► item gone, id 1 never reused             │
//! │                                    │                                   │
//! │                                    └──── &Catalog (snapshot) ────►     │
//! │                                          read-only while quoting       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storing the catalog is somebody else's job; this type only holds a
//! snapshot and applies the admin rules to changes made to it.

use tracing::debug;

use crate::error::{CoreResult, QuoteError, ValidationError};
use crate::money::Money;
use crate::types::{CatalogItem, CatalogItemId};
use crate::validation::{validate_item_name, validate_unit_price};

/// Courses keyed by id, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    /// Highest id assigned or loaded so far; 0 while empty.
    last_id: u64,
}

impl Catalog {
    /// Creates an empty catalog whose first id will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from snapshot items, validating each one.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Adds a new course and assigns it the next id.
    ///
    /// ## Rules
    /// - name is required (trimmed), at most 200 characters
    /// - price must not be negative
    /// - once `u64::MAX` has been handed out, no further ids exist
    pub fn add(&mut self, name: &str, unit_price: Money) -> CoreResult<&CatalogItem> {
        let name = validate_item_name(name)?;
        validate_unit_price(unit_price)?;

        let id = self
            .last_id
            .checked_add(1)
            .map(CatalogItemId::new)
            .ok_or_else(|| ValidationError::Overflow {
                field: "id".to_string(),
            })?;
        self.last_id = id.get();
        debug!(%id, %name, %unit_price, "Adding catalog item");

        let index = self.items.len();
        self.items.push(CatalogItem {
            id,
            name,
            unit_price,
        });
        Ok(&self.items[index])
    }

    /// Loads an item with a known id, e.g. from a stored snapshot.
    pub fn insert(&mut self, item: CatalogItem) -> CoreResult<()> {
        if self.get(item.id).is_some() {
            return Err(QuoteError::DuplicateItem(item.id));
        }
        let name = validate_item_name(&item.name)?;
        validate_unit_price(item.unit_price)?;

        self.last_id = self.last_id.max(item.id.get());
        self.items.push(CatalogItem { name, ..item });
        Ok(())
    }

    /// Changes the name and/or price of an existing item.
    ///
    /// At least one of the two must be given.
    pub fn update(
        &mut self,
        id: CatalogItemId,
        name: Option<&str>,
        unit_price: Option<Money>,
    ) -> CoreResult<&CatalogItem> {
        if name.is_none() && unit_price.is_none() {
            return Err(ValidationError::Required {
                field: "name or price".to_string(),
            }
            .into());
        }

        let name = name.map(validate_item_name).transpose()?;
        if let Some(price) = unit_price {
            validate_unit_price(price)?;
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(QuoteError::ItemNotFound(id))?;

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(price) = unit_price {
            item.unit_price = price;
        }
        debug!(%id, "Updated catalog item");
        Ok(&*item)
    }

    /// Removes an item, returning it.
    pub fn remove(&mut self, id: CatalogItemId) -> CoreResult<CatalogItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(QuoteError::ItemNotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Looks up an item by id.
    pub fn get(&self, id: CatalogItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Iterates items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str, cents: i64) -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new(id),
            name: name.to_string(),
            unit_price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut catalog = Catalog::new();
        let a = catalog.add("Intro", Money::from_cents(1000)).unwrap().id;
        let b = catalog.add("Advanced", Money::from_cents(2500)).unwrap().id;
        assert_eq!(a, CatalogItemId::new(1));
        assert_eq!(b, CatalogItemId::new(2));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut catalog = Catalog::new();
        let a = catalog.add("Intro", Money::from_cents(1000)).unwrap().id;
        catalog.remove(a).unwrap();
        let b = catalog.add("Intro v2", Money::from_cents(1000)).unwrap().id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_catalog_starts_at_one() {
        let mut catalog = Catalog::default();
        let id = catalog.add("Intro", Money::zero()).unwrap().id;
        assert_eq!(id, CatalogItemId::new(1));
    }

    #[test]
    fn test_add_validates_input() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.add("   ", Money::from_cents(100)),
            Err(QuoteError::InvalidInput(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            catalog.add("Intro", Money::from_cents(-1)),
            Err(QuoteError::InvalidInput(ValidationError::Negative { .. }))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_items_keeps_ids_and_continues_after_max() {
        let mut catalog =
            Catalog::from_items(vec![item(7, "Intro", 1000), item(3, "Ops", 500)]).unwrap();
        assert_eq!(catalog.get(CatalogItemId::new(3)).unwrap().name, "Ops");

        let next = catalog.add("New", Money::from_cents(100)).unwrap().id;
        assert_eq!(next, CatalogItemId::new(8));

        let names: Vec<_> = catalog.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Intro", "Ops", "New"]);
    }

    #[test]
    fn test_add_after_max_id_fails() {
        let mut catalog = Catalog::from_items(vec![item(u64::MAX, "Last", 100)]).unwrap();

        assert!(matches!(
            catalog.add("Next", Money::from_cents(100)),
            Err(QuoteError::InvalidInput(ValidationError::Overflow { ref field })) if field == "id"
        ));
        assert_eq!(catalog.len(), 1);

        // Loading a lower id afterwards must not reopen the range
        catalog.insert(item(4, "Ops", 500)).unwrap();
        assert!(catalog.add("Next", Money::from_cents(100)).is_err());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let result = Catalog::from_items(vec![item(1, "A", 100), item(1, "B", 200)]);
        assert!(matches!(result, Err(QuoteError::DuplicateItem(id)) if id.get() == 1));
    }

    #[test]
    fn test_update() {
        let mut catalog = Catalog::from_items(vec![item(1, "Intro", 1000)]).unwrap();
        let id = CatalogItemId::new(1);

        let updated = catalog.update(id, None, Some(Money::from_cents(1200))).unwrap();
        assert_eq!(updated.unit_price, Money::from_cents(1200));
        assert_eq!(updated.name, "Intro");

        let updated = catalog.update(id, Some(" Intro II "), None).unwrap();
        assert_eq!(updated.name, "Intro II");

        assert!(matches!(
            catalog.update(id, None, None),
            Err(QuoteError::InvalidInput(_))
        ));
        assert!(matches!(
            catalog.update(CatalogItemId::new(99), Some("X"), None),
            Err(QuoteError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_remove_unknown_item() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.remove(CatalogItemId::new(5)),
            Err(QuoteError::ItemNotFound(id)) if id.get() == 5
        ));
    }
}
