//! Mock implementations for testing.
//!
//! Provides a scripted transport so the client can be exercised without
//! making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    responses: Mutex<Vec<MockReply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

/// A scripted reply: either a response or a transport failure.
#[derive(Debug, Clone)]
enum MockReply {
    Response(MockResponse),
    Failure(String),
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a 200 JSON response without rate limit headers.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a 200 JSON response carrying the three rate limit headers.
    pub fn success<T: serde::Serialize>(value: &T, limit: u32, remaining: u32, reset_secs: u64) -> Self {
        Self::json(value).with_rate_limit(limit, remaining, reset_secs)
    }

    /// Creates an error response.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&serde_json::json!({ "error": message })).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status,
            headers,
            body,
        }
    }

    /// Replaces the body with raw bytes.
    pub fn with_raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds the rate limit headers.
    pub fn with_rate_limit(self, limit: u32, remaining: u32, reset_secs: u64) -> Self {
        self.with_header("x-rate-limit-limit", &limit.to_string())
            .with_header("x-rate-limit-remaining", &remaining.to_string())
            .with_header("x-rate-reset", &reset_secs.to_string())
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push(MockReply::Response(response));
    }

    /// Queues a connection failure.
    pub fn queue_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockReply::Failure(message.to_string()));
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn next_reply(&self) -> MockReply {
        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        if responses.is_empty() {
            MockReply::Response(MockResponse::error(500, "No mock response configured"))
        } else {
            responses.remove(0)
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);

        match self.next_reply() {
            MockReply::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockReply::Failure(message) => Err(TransportError::Connection { message }),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Test fixtures for common response bodies.
pub mod fixtures {
    use serde_json::{json, Value};

    /// Body for a single-name query.
    pub fn emily() -> Value {
        json!({"name": "Emily", "gender": "female", "probability": 0.97, "count": 1234})
    }

    /// Body for a multi-name query of `["Emily", "Jack"]`.
    pub fn emily_and_jack() -> Value {
        json!([
            {"name": "Emily", "gender": "female", "probability": 0.97, "count": 1234},
            {"name": "Jack", "gender": "male", "probability": 0.99, "count": 567}
        ])
    }
}
