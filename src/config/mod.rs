//! Configuration layer for cielo-gateway.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line
//! 2. **Environment variables** - `CIELO_MERCHANT_ID`, `CIELO_MERCHANT_KEY`
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - The sandbox endpoints
//!
//! The merchant id and key have no default and must come from one of the
//! first three sources.
//!
//! # Fixed Parameters
//!
//! The retry schedule (0s, 1s, 5s, 15s) and the 30-second per-attempt
//! timeout are not configurable from the CLI or the config file.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{CardArgs, Cli, Command, PaymentArgs};
pub use error::{ConfigError, field};
pub use toml::{EndpointsSection, MerchantSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
