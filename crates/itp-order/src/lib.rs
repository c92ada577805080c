//! # itp-order: Order-Status Corroboration
//!
//! Before a ticket is minted, the claim's order data is posted to an
//! external order-status authority. Exactly HTTP 200 or 201 counts as
//! verified. Every other status, and every transport failure including
//! timeout, is a rejection. There is no ambiguous middle state.
//!
//! [`HttpOrderVerifier`] makes one bounded round trip per call.
//! [`RetryingOrderVerifier`] is an opt-in decorator that retries transport
//! failures only; it never changes how a status code is classified.

pub mod client;
pub mod config;
pub mod retry;

pub use client::{
    HttpOrderVerifier, OrderClientError, OrderVerificationResult, OrderVerifier, Rejection,
};
pub use config::{ConfigError, OrderVerificationConfig, DEFAULT_ORDER_STATUS_URL};
pub use retry::RetryingOrderVerifier;
