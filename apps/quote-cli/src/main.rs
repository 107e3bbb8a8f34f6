//! # Course Quote CLI
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quote-cli quote --item 1:50 ──► stdout: {"subtotal": "500.00", ...}    │
//! │                                  exit 0                                 │
//! │                                                                         │
//! │  quote-cli quote --item 9:50 ──► stderr: {"code": "NOT_FOUND", ...}     │
//! │                                  exit 1                                 │
//! │                                                                         │
//! │  logs ──────────────────────────► stderr (RUST_LOG or log_filter)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use quote_cli::{commands, ApiError, Cli, QuoteConfig};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match QuoteConfig::load(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => return report(ApiError::from(err)),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }

    if let Err(err) = init_tracing(&config) {
        return report(err);
    }
    let config_path = cli.config.clone().or_else(QuoteConfig::default_config_path);
    debug!(?config_path, ?config, "Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match commands::run(&cli.command, &config, &mut out) {
        Ok(()) => {
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report(err),
    }
}

/// Writes a failed command's error as one JSON line on stderr.
fn report(err: ApiError) -> Result<ExitCode> {
    let stderr = io::stderr();
    writeln!(stderr.lock(), "{}", err.to_json())?;
    Ok(ExitCode::FAILURE)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quote_core=debug` - Show per-line pricing only
/// - Default: the config's `log_filter` (`info`)
fn init_tracing(config: &QuoteConfig) -> Result<(), ApiError> {
    let filter = config.env_filter()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| ApiError::internal(format!("failed to initialize logging: {}", e)))
}
