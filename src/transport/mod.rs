//! Transport layer for talking to the gateway over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Retrying transient failures on a fixed schedule ([`RetryingClient`], [`BackoffSchedule`])

mod client;
mod error;
mod http;
mod retry;

#[cfg(test)]
mod retry_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::{BackoffSchedule, RetryingClient};
