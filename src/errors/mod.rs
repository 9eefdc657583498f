//! Error types for the Genderize client.
//!
//! Every failure of a query surfaces as a [`GenderizeError`]; nothing is
//! retried or swallowed inside the client.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for Genderize operations.
pub type GenderizeResult<T> = Result<T, GenderizeError>;

/// Error type for Genderize client operations.
#[derive(Debug, Error)]
pub enum GenderizeError {
    /// Configuration error (invalid base URL, proxy, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The API rejected the request with a known failure status (400, 429, 500).
    #[error("{reason}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Reason associated with the status.
        reason: String,
    },

    /// The API answered with a status code the client does not classify.
    #[error("Unexpected status code {status}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body, if it was valid UTF-8.
        body: Option<String>,
    },

    /// Successful status but unusable headers or body.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Error message.
        message: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },
}

impl GenderizeError {
    /// Returns true if the API reported that the rate limit was hit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenderizeError::Request { status: 429, .. })
    }

    /// Returns the HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GenderizeError::Request { status, .. }
            | GenderizeError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        GenderizeError::MalformedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        GenderizeError::Configuration {
            message: message.into(),
        }
    }
}

impl From<TransportError> for GenderizeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { .. } => GenderizeError::Timeout {
                message: err.to_string(),
            },
            TransportError::Connection { .. } | TransportError::InvalidResponse { .. } => {
                GenderizeError::Network {
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<serde_json::Error> for GenderizeError {
    fn from(err: serde_json::Error) -> Self {
        GenderizeError::MalformedResponse {
            message: format!("invalid JSON body: {}", err),
        }
    }
}

impl From<url::ParseError> for GenderizeError {
    fn from(err: url::ParseError) -> Self {
        GenderizeError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_request_error_displays_reason() {
        let error = GenderizeError::Request {
            status: 429,
            reason: "Rate limit hit".to_string(),
        };

        assert_eq!(error.to_string(), "Rate limit hit");
        assert!(error.is_rate_limited());
        assert_eq!(error.status_code(), Some(429));
    }

    #[test]
    fn test_unexpected_status_display() {
        let error = GenderizeError::UnexpectedStatus {
            status: 404,
            body: None,
        };

        assert_eq!(error.to_string(), "Unexpected status code 404");
        assert!(!error.is_rate_limited());
    }

    #[test]
    fn test_transport_timeout_maps_to_timeout() {
        let error: GenderizeError = TransportError::Timeout {
            timeout: Duration::from_secs(5),
        }
        .into();

        assert!(matches!(error, GenderizeError::Timeout { .. }));
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_transport_connection_maps_to_network() {
        let error: GenderizeError = TransportError::Connection {
            message: "connection refused".to_string(),
        }
        .into();

        if let GenderizeError::Network { message } = error {
            assert!(message.contains("connection refused"));
        } else {
            panic!("Expected Network error");
        }
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: GenderizeError = err.into();

        assert!(matches!(error, GenderizeError::MalformedResponse { .. }));
    }
}
