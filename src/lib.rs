//! cielo-gateway: client SDK for the Cielo e-commerce payment API
//!
//! A library for detecting card brands, validating and tokenizing cards,
//! and capturing credit-card sales, with field validation before any
//! network call and a fixed-schedule retry layer under every request.

pub mod card;
pub mod config;
pub mod gateway;
pub mod time;
pub mod transport;
