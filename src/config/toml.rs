//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Merchant credentials section
    #[serde(default)]
    pub merchant: MerchantSection,

    /// Gateway base URLs section
    #[serde(default)]
    pub endpoints: EndpointsSection,
}

/// Merchant credentials section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MerchantSection {
    /// Merchant identifier
    pub id: Option<String>,

    /// Merchant secret key
    pub key: Option<String>,
}

impl std::fmt::Debug for MerchantSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantSection")
            .field("id", &self.id)
            .field("key", &self.key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Gateway base URLs section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsSection {
    /// Base URL for transactional requests
    pub command: Option<String>,

    /// Base URL for lookups
    pub query: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# cielo-gateway configuration file

[merchant]
# Merchant identifier (required)
# Can also be set with --merchant-id or CIELO_MERCHANT_ID
# id = "00000000-0000-0000-0000-000000000000"

# Merchant secret key (required)
# Prefer CIELO_MERCHANT_KEY over storing the key in this file
# key = "your-merchant-key"

[endpoints]
# Base URL for sales, zero-auth and tokenization
# (default: sandbox, can be overridden by --command-url)
# Production: https://api.cieloecommerce.cielo.com.br
command = "https://apisandbox.cieloecommerce.cielo.com.br"

# Base URL for card brand lookups
# (default: sandbox, can be overridden by --query-url)
# Production: https://apiquery.cieloecommerce.cielo.com.br
query = "https://apiquerysandbox.cieloecommerce.cielo.com.br"
"#
    .to_string()
}
