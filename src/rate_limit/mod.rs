//! Rate limit window tracking.
//!
//! Genderize reports its window with three headers on every successful
//! response. The client keeps the last reported values and derives a live
//! countdown from the time the response arrived.

use std::time::{Duration, Instant};

use crate::errors::{GenderizeError, GenderizeResult};
use crate::transport::HttpResponse;

/// Header carrying the number of requests allowed per window.
pub const LIMIT_HEADER: &str = "X-Rate-Limit-Limit";

/// Header carrying the number of requests left in the window.
pub const REMAINING_HEADER: &str = "X-Rate-Limit-Remaining";

/// Header carrying the seconds until the window resets.
pub const RESET_HEADER: &str = "X-Rate-Reset";

/// Ceiling assumed before the first successful response.
pub const DEFAULT_CEILING: u32 = 1000;

/// Rate limit values parsed from one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the window.
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset_secs: u64,
}

impl RateLimitHeaders {
    /// Parses all three headers; any missing or non-integer value fails.
    pub fn from_response(response: &HttpResponse) -> GenderizeResult<Self> {
        Ok(Self {
            limit: parse_header(response, LIMIT_HEADER)?,
            remaining: parse_header(response, REMAINING_HEADER)?,
            reset_secs: parse_header(response, RESET_HEADER)?,
        })
    }
}

fn parse_header<T: std::str::FromStr>(response: &HttpResponse, name: &str) -> GenderizeResult<T> {
    let raw = response
        .header(name)
        .ok_or_else(|| GenderizeError::malformed(format!("missing {} header", name)))?;

    raw.trim().parse().map_err(|_| {
        GenderizeError::malformed(format!("{} header is not an integer: {:?}", name, raw))
    })
}

/// Rate limit state owned by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    ceiling: u32,
    remaining: u32,
    window_reset_secs: u64,
    last_request: Option<Instant>,
    primed: bool,
}

impl RateLimitState {
    /// Creates the state in effect before any request.
    pub fn new() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            remaining: 0,
            window_reset_secs: 0,
            last_request: None,
            primed: false,
        }
    }

    /// Requests allowed per window.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Requests left in the window.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Window length reported at the last successful request, in seconds.
    pub fn window_reset_secs(&self) -> u64 {
        self.window_reset_secs
    }

    /// When the last response was received.
    pub fn last_request(&self) -> Option<Instant> {
        self.last_request
    }

    /// True once a successful response has been recorded.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Stamps the time a response was received, whatever its status.
    pub fn mark_request(&mut self, at: Instant) {
        self.last_request = Some(at);
    }

    /// Commits the values from a successful response.
    pub fn apply(&mut self, headers: RateLimitHeaders) {
        self.ceiling = headers.limit;
        self.remaining = headers.remaining;
        self.window_reset_secs = headers.reset_secs;
        self.primed = true;
    }

    /// Whole seconds left in the window as seen at `now`, never negative.
    pub fn time_remaining_at(&self, now: Instant) -> u64 {
        let elapsed = self
            .last_request
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::ZERO);

        Duration::from_secs(self.window_reset_secs)
            .saturating_sub(elapsed)
            .as_secs()
    }

    /// Whole seconds left in the window right now.
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining_at(Instant::now())
    }
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            body: Vec::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let state = RateLimitState::new();

        assert_eq!(state.ceiling(), 1000);
        assert_eq!(state.remaining(), 0);
        assert_eq!(state.time_remaining(), 0);
        assert!(!state.is_primed());
        assert!(state.last_request().is_none());
    }

    #[test]
    fn test_parse_headers() {
        let headers = RateLimitHeaders::from_response(&response(&[
            ("x-rate-limit-limit", "1000"),
            ("x-rate-limit-remaining", "998"),
            ("x-rate-reset", "43200"),
        ]))
        .unwrap();

        assert_eq!(
            headers,
            RateLimitHeaders {
                limit: 1000,
                remaining: 998,
                reset_secs: 43200,
            }
        );
    }

    #[test]
    fn test_parse_headers_missing() {
        let result = RateLimitHeaders::from_response(&response(&[
            ("x-rate-limit-limit", "1000"),
            ("x-rate-reset", "43200"),
        ]));

        match result {
            Err(GenderizeError::MalformedResponse { message }) => {
                assert!(message.contains(REMAINING_HEADER));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_headers_not_integer() {
        let result = RateLimitHeaders::from_response(&response(&[
            ("x-rate-limit-limit", "1000"),
            ("x-rate-limit-remaining", "998"),
            ("x-rate-reset", "soon"),
        ]));

        assert!(matches!(result, Err(GenderizeError::MalformedResponse { .. })));
    }

    #[test]
    fn test_apply_primes_state() {
        let mut state = RateLimitState::new();
        state.apply(RateLimitHeaders {
            limit: 1000,
            remaining: 998,
            reset_secs: 43200,
        });

        assert!(state.is_primed());
        assert_eq!(state.ceiling(), 1000);
        assert_eq!(state.remaining(), 998);
        assert_eq!(state.window_reset_secs(), 43200);
    }

    #[test]
    fn test_time_remaining_counts_down() {
        let start = Instant::now();
        let mut state = RateLimitState::new();
        state.mark_request(start);
        state.apply(RateLimitHeaders {
            limit: 1000,
            remaining: 10,
            reset_secs: 60,
        });

        assert_eq!(state.time_remaining_at(start), 60);
        assert_eq!(state.time_remaining_at(start + Duration::from_millis(500)), 59);
        assert_eq!(state.time_remaining_at(start + Duration::from_secs(15)), 45);
    }

    #[test]
    fn test_time_remaining_never_negative() {
        let start = Instant::now();
        let mut state = RateLimitState::new();
        state.mark_request(start);
        state.apply(RateLimitHeaders {
            limit: 1000,
            remaining: 10,
            reset_secs: 5,
        });

        assert_eq!(state.time_remaining_at(start + Duration::from_secs(5)), 0);
        assert_eq!(state.time_remaining_at(start + Duration::from_secs(3600)), 0);
    }
}
