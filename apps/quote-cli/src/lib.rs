//! # quote-cli
//!
//! Command-line front end for the course quotation calculator.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         quote-cli                                       │
//! │                                                                         │
//! │  main.rs                                                                │
//! │  • Parse args (clap)                                                    │
//! │  • Load QuoteConfig (defaults → quote.toml → QUOTE_* env)               │
//! │  • Initialize tracing-subscriber with env filter                        │
//! │  • Run command, print ApiError JSON on failure                          │
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐    │
//! │  │    cli      │  │  commands   │  │  snapshot   │  │   render    │    │
//! │  │  Cli args   │─►│ quote/tiers │─►│ data file   │  │ json / text │    │
//! │  └─────────────┘  └──────┬──────┘  └─────────────┘  └─────────────┘    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                    quote-core (all pricing logic)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod snapshot;

pub use cli::{Cli, Command};
pub use config::{OutputFormat, QuoteConfig};
pub use error::{ApiError, ErrorCode};
