//! # Snapshot Files
//!
//! Reads the catalog/tier data file and quotation request files.
//!
//! ## Snapshot Format
//! The admin tool's data file, read as-is:
//! ```json
//! {
//!   "courses": [
//!     { "id": 1, "name": "Intro to Rust", "price": 10.0 }
//!   ],
//!   "priceRanges": [
//!     { "minUsers": 1, "maxUsers": 99, "pricePerLicense": 1.0 },
//!     { "minUsers": 100, "maxUsers": null, "pricePerLicense": 0.9 }
//!   ]
//! }
//! ```
//! An empty or missing `priceRanges` means the default schedule.
//!
//! ## Request Format
//! ```json
//! { "quotationItems": [ { "courseId": 1, "users": 50 } ] }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use quote_core::{
    Catalog, CatalogItem, QuotationLineItem, QuoteError, RawTier, TierTable, ValidationError,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] QuoteError),

    #[error("Invalid price ranges: {0}")]
    Tiers(#[from] ValidationError),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    #[serde(default)]
    courses: Vec<CatalogItem>,

    #[serde(default, alias = "tiers")]
    price_ranges: Vec<RawTier>,
}

/// Catalog and tier table read from one data file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub tiers: TierTable,
}

impl Snapshot {
    /// Loads and validates a snapshot file.
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let contents = read(path)?;
        let snapshot = Self::from_json(&contents).map_err(|err| match err {
            SnapshotError::Parse { source, .. } => SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            ?path,
            courses = snapshot.catalog.len(),
            tiers = snapshot.tiers.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Parses a snapshot body.
    pub fn from_json(contents: &str) -> SnapshotResult<Self> {
        let file: SnapshotFile =
            serde_json::from_str(contents).map_err(|source| SnapshotError::Parse {
                path: PathBuf::from("<snapshot>"),
                source,
            })?;

        let catalog = Catalog::from_items(file.courses)?;

        let tiers = if file.price_ranges.is_empty() {
            info!("Snapshot has no price ranges, using default schedule");
            TierTable::default_schedule()
        } else {
            TierTable::replace_from(&file.price_ranges)?
        };

        for issue in tiers.coverage_issues() {
            warn!(%issue, "Tier table coverage");
        }

        Ok(Snapshot { catalog, tiers })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFile {
    #[serde(alias = "lineItems")]
    quotation_items: Vec<QuotationLineItem>,
}

/// Reads the line items of a quotation request file.
pub fn load_request(path: &Path) -> SnapshotResult<Vec<QuotationLineItem>> {
    let contents = read(path)?;
    let request: RequestFile =
        serde_json::from_str(&contents).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(request.quotation_items)
}

fn read(path: &Path) -> SnapshotResult<String> {
    std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{CatalogItemId, Money};
    use rust_decimal_macros::dec;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "courses": [
            { "id": 1700000000001, "name": "Intro to Rust", "price": 10 },
            { "id": 1700000000002, "name": "Async Rust", "price": 24.5 }
        ],
        "priceRanges": [
            { "minUsers": 1, "maxUsers": 99, "pricePerLicense": 1.0 },
            { "minUsers": 100, "maxUsers": null, "pricePerLicense": 0.9 }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();

        let async_rust = snapshot
            .catalog
            .get(CatalogItemId::new(1_700_000_000_002))
            .unwrap();
        assert_eq!(async_rust.unit_price, Money::from_cents(2450));

        assert_eq!(snapshot.tiers.len(), 2);
        assert!(snapshot.tiers.tiers()[1].is_unbounded());
        assert_eq!(
            snapshot.tiers.multiplier_for(150).multiplier.value(),
            dec!(0.9)
        );
    }

    #[test]
    fn test_missing_ranges_use_default_schedule() {
        let snapshot = Snapshot::from_json(r#"{ "courses": [] }"#).unwrap();
        assert!(snapshot.catalog.is_empty());
        assert_eq!(snapshot.tiers, TierTable::default_schedule());
    }

    #[test]
    fn test_invalid_catalog_is_reported() {
        let result = Snapshot::from_json(
            r#"{ "courses": [ { "id": 1, "name": "A", "price": 1 },
                              { "id": 1, "name": "B", "price": 2 } ] }"#,
        );
        assert!(matches!(
            result,
            Err(SnapshotError::Catalog(QuoteError::DuplicateItem(_)))
        ));
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let result = Snapshot::from_json(
            r#"{ "priceRanges": [ { "minUsers": 1, "pricePerLicense": -1 } ] }"#,
        );
        assert!(matches!(result, Err(SnapshotError::Tiers(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.catalog.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            Snapshot::load(&missing),
            Err(SnapshotError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_file_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        match Snapshot::load(file.path()) {
            Err(SnapshotError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_request_accepts_wire_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{ "quotationItems": [ { "courseId": 1, "users": 50 },
                                      { "catalogItemId": 2, "quantity": 7 } ] }"#,
        )
        .unwrap();

        let lines = load_request(file.path()).unwrap();
        assert_eq!(
            lines,
            vec![
                QuotationLineItem::new(CatalogItemId::new(1), 50),
                QuotationLineItem::new(CatalogItemId::new(2), 7),
            ]
        );
    }
}
