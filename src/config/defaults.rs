//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Sandbox base URL for transactional requests.
pub const COMMAND_URL: &str = "https://apisandbox.cieloecommerce.cielo.com.br";

/// Sandbox base URL for lookups.
pub const QUERY_URL: &str = "https://apiquerysandbox.cieloecommerce.cielo.com.br";

/// Per-attempt HTTP timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// File name written by `init` when no output path is given.
pub const CONFIG_FILE: &str = "cielo-gateway.toml";

/// Per-attempt HTTP timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
