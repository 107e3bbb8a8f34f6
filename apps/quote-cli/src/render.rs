//! # Output Rendering
//!
//! Writes quotes and tier tables as JSON or aligned text.
//!
//! ## Text Layout
//! ```text
//! Intro to Rust                50 × $10.00 × 1.00   $500.00
//! ─────────────────────────────────────────────────────────
//! Subtotal          500.00
//! Discount          12.74%
//! Final price       436.29
//! Unit price          8.73
//! ```

use std::io::Write;

use quote_core::{CoverageIssue, QuoteResult, TierTable, VolumeTier};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::ApiError;

/// Writes a quote.
///
/// JSON output is the summary record alone. Tier warnings go to the log,
/// and text output lists them under the totals.
pub fn write_quote(
    out: &mut impl Write,
    quote: &QuoteResult,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let summary = quote.summary();

    match format {
        OutputFormat::Json => write_json(out, &summary)?,
        OutputFormat::Text => {
            for line in &quote.lines {
                writeln!(
                    out,
                    "{:<28} {:>6} × {} × {}   {}",
                    line.name,
                    line.quantity,
                    line.unit_price.round_cents(),
                    line.multiplier,
                    line.line_total.round_cents()
                )?;
            }
            writeln!(out, "{}", "─".repeat(57))?;
            writeln!(out, "{:<14} {:>10}", "Subtotal", summary.subtotal)?;
            writeln!(out, "{:<14} {:>10}", "Discount", summary.discount_applied)?;
            writeln!(out, "{:<14} {:>10}", "Final price", summary.final_price)?;
            writeln!(out, "{:<14} {:>10}", "Unit price", summary.unit_price)?;

            for warning in &quote.warnings {
                writeln!(out, "warning: {}", warning)?;
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct TierReport<'a> {
    tiers: &'a [VolumeTier],
    issues: Vec<CoverageIssue>,
}

/// Writes the effective tier table and its coverage diagnostics.
pub fn write_tiers(
    out: &mut impl Write,
    tiers: &TierTable,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let issues = tiers.coverage_issues();

    match format {
        OutputFormat::Json => write_json(
            out,
            &TierReport {
                tiers: tiers.tiers(),
                issues,
            },
        )?,
        OutputFormat::Text => {
            for (index, tier) in tiers.tiers().iter().enumerate() {
                writeln!(out, "{:>3}  {}", index, tier)?;
            }
            if issues.is_empty() {
                writeln!(out, "Every quantity from 1 up is covered exactly once")?;
            }
            for issue in &issues {
                writeln!(out, "issue: {}", issue)?;
            }
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), ApiError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))?;
    writeln!(out, "{}", json)?;
    Ok(())
}
