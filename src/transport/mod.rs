//! HTTP transport layer for the Genderize client.
//!
//! Provides the HTTP transport abstraction and the reqwest-backed
//! implementation that owns the shared connection pool.

mod http;

pub use http::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};
pub(crate) use http::proxy_for;

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
