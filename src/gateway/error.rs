//! Error type for gateway operations.

use thiserror::Error;

use crate::card::ValidationError;
use crate::transport::{HttpError, TransportError};

/// Broad category of a [`GatewayError`], matching how a caller reacts to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any network I/O. Fix the input.
    Validation,
    /// Client misconfigured (credentials, base URLs, HTTP client setup).
    Configuration,
    /// Network failures or repeated 5xx after the retry budget.
    Transport,
    /// Unexpected status code or undecodable body.
    Protocol,
    /// Well-formed answer that is missing data or rejects the request.
    Semantic,
}

/// Error type for gateway operations.
///
/// Every variant is terminal: nothing above the transport layer retries.
/// [`GatewayError::PaymentIdUnrecoverable`] needs special care, see
/// [`GatewayError::is_outcome_unknown`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A card or payment field is invalid; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A merchant credential cannot be sent as a header.
    #[error("Invalid {field}: {reason}")]
    InvalidCredential {
        /// Which credential
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A base URL or endpoint URL is unusable.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// The request payload could not be serialized.
    #[error("failed to create request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// No acceptable response after the retry budget was spent.
    #[error("failed to send request: {0}")]
    Transport(#[from] TransportError),

    /// The gateway answered with a status other than the one the operation
    /// expects. The body was not decoded.
    #[error("gateway responded with status code {}", .status.as_u16())]
    UnexpectedStatus {
        /// Status received
        status: http::StatusCode,
        /// Status the operation expects on success
        expected: http::StatusCode,
    },

    /// The response body is not the JSON document expected.
    #[error("failed to parse response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The expected status arrived but its body could not be read in full.
    /// The request was not sent again.
    #[error("failed to read response body: {0}")]
    IncompleteBody(#[source] TransportError),

    /// A required field is absent or empty in an otherwise valid response.
    #[error("could not find {field} field in response body")]
    MissingField {
        /// Gateway name of the missing field
        field: &'static str,
    },

    /// The zero-dollar authorization says the card cannot be used.
    #[error("{}", rejection_message(.reason.as_deref()))]
    CardRejected {
        /// `ReturnMessage` from the gateway, when present
        reason: Option<String>,
        /// `ReturnCode` from the gateway, when present
        code: Option<String>,
    },

    /// The sale was confirmed (201) but its identifier could not be read.
    ///
    /// The charge may exist on the gateway side: reconcile, do not retry.
    #[error("transaction confirmed, but could not get PaymentId")]
    PaymentIdUnrecoverable {
        /// Read or decode failure, when the body was not a JSON document
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GatewayError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidCredential { .. } | Self::InvalidUrl { .. } | Self::HttpClient(_) => {
                ErrorKind::Configuration
            }
            Self::Transport(_) => ErrorKind::Transport,
            Self::Encode(_)
            | Self::UnexpectedStatus { .. }
            | Self::Decode(_)
            | Self::IncompleteBody(_) => ErrorKind::Protocol,
            Self::MissingField { .. }
            | Self::CardRejected { .. }
            | Self::PaymentIdUnrecoverable { .. } => ErrorKind::Semantic,
        }
    }

    /// Returns true if the payment may have been captured despite the error.
    ///
    /// Callers must not retry the charge when this is true; the order has to
    /// be reconciled with the gateway first.
    #[must_use]
    pub const fn is_outcome_unknown(&self) -> bool {
        matches!(self, Self::PaymentIdUnrecoverable { .. })
    }
}

fn rejection_message(reason: Option<&str>) -> String {
    reason.map_or_else(
        || "unknown reason".to_string(),
        |reason| format!("card is not valid: {reason}"),
    )
}
