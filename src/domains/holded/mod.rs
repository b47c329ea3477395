//! Holded API domain module.
//!
//! This module wraps outbound calls to the Holded invoicing/CRM service.
//!
//! ## Architecture
//!
//! - `request.rs` - `ApiRequest`, the routed (method, path, query, body) value
//! - `client.rs` - `HoldedApi` trait and the reqwest-backed `HoldedClient`
//! - `error.rs` - Client-specific error types
//!
//! The client never retries and never advances pages on its own. Every call
//! is a single outbound request whose 2xx body is returned as parsed JSON.

mod client;
mod error;
mod request;

pub use client::{DEFAULT_BASE_URL, HoldedApi, HoldedClient};
pub use error::ClientError;
pub use request::ApiRequest;
