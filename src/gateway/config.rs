//! Immutable merchant credentials and endpoints.

use std::fmt;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::GatewayError;

/// Header carrying the merchant identifier.
pub static MERCHANT_ID_HEADER: HeaderName = HeaderName::from_static("merchantid");
/// Header carrying the merchant secret key.
pub static MERCHANT_KEY_HEADER: HeaderName = HeaderName::from_static("merchantkey");

/// Credentials and base URLs for one merchant.
///
/// Everything is checked once in the constructor and never changes
/// afterwards, so a single value can be shared by any number of concurrent
/// calls. The merchant key only ever leaves this struct as a sensitive
/// header value; `Debug` redacts it.
///
/// # Example
///
/// ```
/// use cielo_gateway::gateway::GatewayConfig;
///
/// let config = GatewayConfig::new(
///     "merchant-id",
///     "merchant-key",
///     "https://apisandbox.cieloecommerce.cielo.com.br",
///     "https://apiquerysandbox.cieloecommerce.cielo.com.br",
/// )
/// .unwrap();
/// assert!(!format!("{config:?}").contains("merchant-key"));
/// ```
#[derive(Clone)]
pub struct GatewayConfig {
    merchant_id: String,
    command_url: Url,
    query_url: Url,
    headers: HeaderMap,
}

impl GatewayConfig {
    /// Creates a configuration from the four raw strings.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidCredential`] if the id or key is empty or
    ///   not a valid header value
    /// - [`GatewayError::InvalidUrl`] if a base URL does not parse or is
    ///   not an absolute http(s) URL
    pub fn new(
        merchant_id: &str,
        merchant_key: &str,
        command_url: &str,
        query_url: &str,
    ) -> Result<Self, GatewayError> {
        Self::from_parts(
            merchant_id,
            merchant_key,
            parse_base_url(command_url)?,
            parse_base_url(query_url)?,
        )
    }

    /// Creates a configuration from already-parsed base URLs.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayConfig::new`].
    pub fn from_parts(
        merchant_id: &str,
        merchant_key: &str,
        command_url: Url,
        query_url: Url,
    ) -> Result<Self, GatewayError> {
        check_base_url(&command_url)?;
        check_base_url(&query_url)?;

        let id_value = credential_value("merchant id", merchant_id)?;
        let mut key_value = credential_value("merchant key", merchant_key)?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(&MERCHANT_ID_HEADER, id_value);
        headers.insert(&MERCHANT_KEY_HEADER, key_value);

        Ok(Self {
            merchant_id: merchant_id.to_string(),
            command_url,
            query_url,
            headers,
        })
    }

    /// Returns the merchant identifier.
    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Returns the base URL for mutating operations.
    #[must_use]
    pub const fn command_url(&self) -> &Url {
        &self.command_url
    }

    /// Returns the base URL for lookups.
    #[must_use]
    pub const fn query_url(&self) -> &Url {
        &self.query_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn command_endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        endpoint(&self.command_url, segments)
    }

    pub(crate) fn query_endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        endpoint(&self.query_url, segments)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_key", &"[redacted]")
            .field("command_url", &self.command_url.as_str())
            .field("query_url", &self.query_url.as_str())
            .finish()
    }
}

/// Appends path segments to a base URL, keeping any base path prefix.
///
/// Segments are percent-encoded, so caller input cannot escape the path.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| GatewayError::InvalidUrl {
            url: base.to_string(),
            reason: "cannot be used as a base URL".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    Url::parse(raw).map_err(|e| GatewayError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn check_base_url(url: &Url) -> Result<(), GatewayError> {
    let reason = if !matches!(url.scheme(), "http" | "https") {
        "scheme must be http or https"
    } else if url.cannot_be_a_base() {
        "cannot be used as a base URL"
    } else if url.query().is_some() || url.fragment().is_some() {
        "must not contain a query or fragment"
    } else {
        return Ok(());
    };

    Err(GatewayError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    })
}

fn credential_value(field: &'static str, raw: &str) -> Result<HeaderValue, GatewayError> {
    if raw.trim().is_empty() {
        return Err(GatewayError::InvalidCredential {
            field,
            reason: "cannot be empty".to_string(),
        });
    }

    HeaderValue::from_str(raw).map_err(|e| GatewayError::InvalidCredential {
        field,
        reason: e.to_string(),
    })
}
