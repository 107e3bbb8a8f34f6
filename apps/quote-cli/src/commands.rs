//! # Commands
//!
//! One function per subcommand. Each resolves its inputs, calls into
//! `quote-core` and hands the result to the renderer.
//!
//! ```text
//! quote --snapshot db.json --item 1:50 --item 2:120
//!    │
//!    ├─► Snapshot::load(db.json) ──► Catalog + TierTable
//!    ├─► parse_line_item("1:50") ──► QuotationLineItem
//!    ├─► compute_quote(lines, &catalog, &tiers)
//!    └─► render::write_quote(stdout, ..)
//! ```

use std::io::Write;
use std::path::Path;

use tracing::info;

use quote_core::validation::parse_line_item;
use quote_core::{compute_quote, QuotationLineItem};

use crate::cli::Command;
use crate::config::QuoteConfig;
use crate::error::ApiError;
use crate::render;
use crate::snapshot::{self, Snapshot};

/// Runs a parsed subcommand, writing its output to `out`.
pub fn run(command: &Command, config: &QuoteConfig, out: &mut impl Write) -> Result<(), ApiError> {
    match command {
        Command::Quote {
            snapshot,
            items,
            request,
        } => quote(
            snapshot_path(snapshot.as_deref(), config)?,
            items,
            request.as_deref(),
            config,
            out,
        ),
        Command::Tiers { snapshot } => tiers(snapshot_path(snapshot.as_deref(), config)?, config, out),
    }
}

fn quote(
    snapshot_path: &Path,
    items: &[String],
    request: Option<&Path>,
    config: &QuoteConfig,
    out: &mut impl Write,
) -> Result<(), ApiError> {
    let snapshot = Snapshot::load(snapshot_path)?;

    let lines: Vec<QuotationLineItem> = match request {
        Some(path) => snapshot::load_request(path)?,
        None => items
            .iter()
            .map(|item| parse_line_item(item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::validation(e.to_string()))?,
    };

    let quote = compute_quote(&lines, &snapshot.catalog, &snapshot.tiers)?;
    info!(
        lines = quote.lines.len(),
        total_quantity = quote.total_quantity,
        final_price = %quote.final_price,
        warnings = quote.warnings.len(),
        "Quote computed"
    );

    render::write_quote(out, &quote, config.output)
}

fn tiers(snapshot_path: &Path, config: &QuoteConfig, out: &mut impl Write) -> Result<(), ApiError> {
    let snapshot = Snapshot::load(snapshot_path)?;
    render::write_tiers(out, &snapshot.tiers, config.output)
}

/// Picks the snapshot path: command flag first, then config.
fn snapshot_path<'a>(
    flag: Option<&'a Path>,
    config: &'a QuoteConfig,
) -> Result<&'a Path, ApiError> {
    flag.or(config.snapshot_path.as_deref()).ok_or_else(|| {
        ApiError::config("No snapshot file: pass --snapshot or set QUOTE_SNAPSHOT")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::ErrorCode;
    use std::path::PathBuf;

    const SNAPSHOT: &str = r#"{
        "courses": [
            { "id": 1, "name": "Intro to Rust", "price": 10 },
            { "id": 2, "name": "Ops", "price": 5 }
        ],
        "priceRanges": []
    }"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        snapshot: PathBuf,
        config: QuoteConfig,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("database.json");
        std::fs::write(&snapshot, SNAPSHOT).unwrap();
        Fixture {
            config: QuoteConfig {
                snapshot_path: Some(snapshot.clone()),
                ..QuoteConfig::default()
            },
            snapshot,
            _dir: dir,
        }
    }

    fn quote_items(items: &[&str]) -> Command {
        Command::Quote {
            snapshot: None,
            items: items.iter().map(|s| s.to_string()).collect(),
            request: None,
        }
    }

    fn run_to_string(command: &Command, config: &QuoteConfig) -> Result<String, ApiError> {
        let mut out = Vec::new();
        run(command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_quote_from_items() {
        let fx = fixture();
        let text = run_to_string(&quote_items(&["1:50"]), &fx.config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["finalPrice"], "436.29");
    }

    #[test]
    fn test_quote_from_request_file() {
        let fx = fixture();
        let request = fx.snapshot.with_file_name("request.json");
        std::fs::write(
            &request,
            r#"{ "quotationItems": [ { "courseId": 1, "users": 50 }, { "courseId": 2, "users": 120 } ] }"#,
        )
        .unwrap();

        let command = Command::Quote {
            snapshot: Some(fx.snapshot.clone()),
            items: Vec::new(),
            request: Some(request),
        };
        let text = run_to_string(&command, &QuoteConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        // 10×50×1.00 + 5×120×0.90
        assert_eq!(value["subtotal"], "1040.00");
    }

    #[test]
    fn test_quote_unknown_item() {
        let fx = fixture();
        let err = run_to_string(&quote_items(&["1:5", "99:5"]), &fx.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Catalog item not found: 99");
    }

    #[test]
    fn test_quote_bad_items() {
        let fx = fixture();

        let err = run_to_string(&quote_items(&["1-5"]), &fx.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = run_to_string(&quote_items(&["1:0"]), &fx.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = run_to_string(&quote_items(&[]), &fx.config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_missing_snapshot_is_config_error() {
        let err = run_to_string(&quote_items(&["1:5"]), &QuoteConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_tiers_text() {
        let mut fx = fixture();
        fx.config.output = OutputFormat::Text;
        let text = run_to_string(&Command::Tiers { snapshot: None }, &fx.config).unwrap();
        assert!(text.contains("1-99 ×1.00"));
        assert!(text.contains("10000+ ×0.50"));
    }
}
