//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use crate::gateway::GatewayConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Merchant credentials and base URLs
    pub gateway: GatewayConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ merchant_id: {}, command_url: {}, query_url: {} }}",
            self.gateway.merchant_id(),
            self.gateway.command_url(),
            self.gateway.query_url(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment variables) take precedence over
    /// TOML config values, which take precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The merchant id or key is missing
    /// - A credential or base URL is rejected by [`GatewayConfig::new`]
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let merchant_id = cli
            .merchant_id
            .as_deref()
            .or_else(|| toml.and_then(|t| t.merchant.id.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::MERCHANT_ID,
                    "Use --merchant-id, CIELO_MERCHANT_ID or set merchant.id in config file",
                )
            })?;

        let merchant_key = cli
            .merchant_key
            .as_deref()
            .or_else(|| toml.and_then(|t| t.merchant.key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::MERCHANT_KEY,
                    "Use --merchant-key, CIELO_MERCHANT_KEY or set merchant.key in config file",
                )
            })?;

        // Priority: CLI explicit > TOML > default
        let command_url = cli
            .command_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.endpoints.command.as_deref()))
            .unwrap_or(defaults::COMMAND_URL);

        let query_url = cli
            .query_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.endpoints.query.as_deref()))
            .unwrap_or(defaults::QUERY_URL);

        let gateway = GatewayConfig::new(merchant_id, merchant_key, command_url, query_url)?;

        Ok(Self {
            gateway,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
