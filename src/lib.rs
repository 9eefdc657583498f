//! Genderize.io Client Library
//!
//! A Rust client for the [Genderize.io](https://genderize.io) API, which
//! infers the gender of first names. The client sends one or more names per
//! request and tracks the rate limit window the API reports, so callers can
//! decide when to send the next batch.
//!
//! # Features
//!
//! - **Single or batched names**: `&str`, `String`, slices, arrays and vectors
//! - **Dual-shape results**: one object for one name, a list for several
//! - **Rate limit tracking**: limit, remaining requests and a live countdown
//! - **Proxies**: per-scheme proxy mapping fixed at construction
//! - **Observability**: `tracing` spans and events around every query
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use genderize_client::GenderizeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GenderizeClient::new()?;
//!
//!     let result = client.query("Emily").await?;
//!     if let Some(record) = result.as_single() {
//!         println!("{} -> {:?}", record.name, record.gender);
//!     }
//!
//!     println!("{} seconds until reset", client.rate_limit_time_remaining());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod rate_limit;
pub mod transport;
pub mod types;

pub use client::{GenderizeClient, GenderizeClientBuilder};
pub use config::GenderizeConfig;
pub use errors::{GenderizeError, GenderizeResult};
pub use rate_limit::RateLimitState;
pub use types::{Gender, GenderRecord, Names, QueryResult, ResponseStatus};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
