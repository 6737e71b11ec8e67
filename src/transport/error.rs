//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy;
/// [`RetryingClient`](super::RetryingClient) decides which ones are retried.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and connections dropped while reading the body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the per-attempt timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (invalid URL, header or method).
    ///
    /// A configuration error rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The status line arrived but the body could not be read in full.
    ///
    /// Covers connections dropped and timeouts hit after the headers.
    #[error("Failed to read body of {} response: {source}", .status.as_u16())]
    Body {
        /// Status of the response whose body was lost
        status: http::StatusCode,
        /// Underlying read failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HttpError {
    /// Returns true if the failure is potentially transient and the
    /// request may be attempted again.
    ///
    /// A request that cannot be built fails the same way on every attempt,
    /// so `InvalidUrl` is not retried. A lost body is retried only when the
    /// status already asked for a retry: below 500 the server has acted on
    /// the request and sending it again could repeat a charge.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
            Self::Body { status, .. } => status.is_server_error(),
        }
    }

    /// Returns the response status, if one was received before the failure.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Body { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Terminal outcome of a retried request that never produced an
/// acceptable response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Every attempt failed; the last one failed at the transport level.
    #[error("too many retries: {source}")]
    Exhausted {
        /// Number of attempts made
        attempts: usize,
        /// Error from the last attempt
        #[source]
        source: HttpError,
    },

    /// Every attempt failed; the last one returned a server error.
    #[error("too many retries: received {} status code", .status.as_u16())]
    ServerError {
        /// Number of attempts made
        attempts: usize,
        /// Status code of the last response
        status: http::StatusCode,
    },

    /// The backoff schedule allowed no attempt at all.
    #[error("too many retries")]
    NoAttempts,

    /// An attempt failed in a way that repeating cannot fix.
    #[error("request rejected before sending: {0}")]
    Rejected(#[source] HttpError),

    /// The gateway answered with a non-5xx status but the body was lost.
    ///
    /// The request reached the server and was acted on, so it is not sent
    /// again.
    #[error("response body could not be read: {source}")]
    Incomplete {
        /// Attempt that received the status
        attempts: usize,
        /// The [`HttpError::Body`] failure
        #[source]
        source: HttpError,
    },
}

impl TransportError {
    /// Returns the status code of the last response, if the last attempt
    /// produced one.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::Incomplete { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns how many attempts were made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        match self {
            Self::Exhausted { attempts, .. }
            | Self::ServerError { attempts, .. }
            | Self::Incomplete { attempts, .. } => *attempts,
            Self::NoAttempts => 0,
            Self::Rejected(_) => 1,
        }
    }
}
