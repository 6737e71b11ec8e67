//! Gateway client: credentials, wire format and the four operations.
//!
//! - [`GatewayConfig`] holds the merchant credentials and base URLs
//! - [`GatewayClient`] runs brand detection, zero-auth validation,
//!   tokenization and captured sales over a retrying transport
//! - [`GatewayError`] is the single error type callers handle

mod client;
mod config;
mod error;
mod wire;


pub use client::GatewayClient;
pub use config::{GatewayConfig, MERCHANT_ID_HEADER, MERCHANT_KEY_HEADER};
pub use error::{ErrorKind, GatewayError};
