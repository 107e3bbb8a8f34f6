//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, global = true, help = "(Optional) Path to quote.toml.")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, help = "(Optional) Output format.")]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Prices a quotation.
    Quote {
        #[arg(long, help = "Catalog/tier snapshot file.")]
        snapshot: Option<PathBuf>,

        #[arg(
            long = "item",
            value_name = "ID:QTY",
            help = "A course and its seats. Repeat for more lines."
        )]
        items: Vec<String>,

        #[arg(
            long,
            conflicts_with = "items",
            help = "JSON request file with quotationItems."
        )]
        request: Option<PathBuf>,
    },

    /// Shows the effective tier table and its coverage.
    Tiers {
        #[arg(long, help = "Catalog/tier snapshot file.")]
        snapshot: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_items() {
        let cli = Cli::parse_from([
            "quote-cli", "quote", "--snapshot", "db.json", "--item", "1:50", "--item", "2:7",
        ]);
        match cli.command {
            Command::Quote { snapshot, items, request } => {
                assert_eq!(snapshot, Some(PathBuf::from("db.json")));
                assert_eq!(items, vec!["1:50", "2:7"]);
                assert_eq!(request, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_output() {
        let cli = Cli::parse_from(["quote-cli", "tiers", "--output", "text"]);
        assert_eq!(cli.output, Some(OutputFormat::Text));
    }

    #[test]
    fn test_items_conflict_with_request() {
        let result = Cli::try_parse_from([
            "quote-cli", "quote", "--item", "1:5", "--request", "req.json",
        ]);
        assert!(result.is_err());
    }
}
