//! Observability for the Genderize client.
//!
//! The library only emits `tracing` spans and events. Installing a
//! subscriber is left to the application; [`LoggingConfig::init`] is a
//! convenience for binaries and demos.

mod logging;

pub use logging::{log_query_outcome, log_rate_limit, LogFormat, LogLevel, LoggingConfig};
