//! # CLI Configuration
//!
//! Configuration management for the quote command line.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --snapshot data.json   --output text                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     QUOTE_SNAPSHOT=/srv/quote/database.json                            │
//! │     QUOTE_LOG=debug                                                    │
//! │     QUOTE_OUTPUT=text                                                  │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/course-quote/quote.toml (Linux)                          │
//! │     ~/Library/Application Support/com.course.quote/quote.toml (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     no snapshot, log "info", JSON output                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quote.toml
//! snapshot_path = "/srv/quote/database.json"
//! log_filter = "info,quote_core=debug"
//! output = "text"  # json | text
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Output Format
// =============================================================================

/// How results are written to stdout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Machine-readable JSON (the summary record).
    #[default]
    Json,

    /// Aligned plain text for humans.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "plain" => Ok(OutputFormat::Text),
            other => Err(ConfigError::Invalid(format!(
                "Unknown output format: '{}'. Valid options: json, text",
                other
            ))),
        }
    }
}

// =============================================================================
// Quote Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Catalog/tier snapshot file. Can also be given per command.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            snapshot_path: None,
            log_filter: default_log_filter(),
            output: OutputFormat::default(),
        }
    }
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quote.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
                }
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file body.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        self.config_filter()?;

        if let Some(ref path) = self.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "snapshot_path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Log filter for the subscriber: `RUST_LOG` when set and valid,
    /// otherwise `log_filter`.
    pub fn env_filter(&self) -> ConfigResult<EnvFilter> {
        EnvFilter::try_from_default_env().or_else(|_| self.config_filter())
    }

    fn config_filter(&self) -> ConfigResult<EnvFilter> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            ConfigError::Invalid(format!("log_filter '{}' is invalid: {}", self.log_filter, e))
        })
    }

    /// Applies `QUOTE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(path) = lookup("QUOTE_SNAPSHOT") {
            self.snapshot_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("QUOTE_LOG") {
            self.log_filter = filter;
        }

        if let Some(output) = lookup("QUOTE_OUTPUT") {
            self.output = output.parse()?;
        }

        Ok(())
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "course", "quote")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }
}
