//! Configuration module for the Genderize client.
//!
//! Holds the endpoint, request timeout and proxy mapping. Proxies are fixed
//! once the configuration is built and apply to every request.

use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::errors::{GenderizeError, GenderizeResult};
use crate::transport::proxy_for;

/// Default endpoint of the Genderize API.
pub const DEFAULT_BASE_URL: &str = "https://api.genderize.io/";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Genderize client.
#[derive(Clone)]
pub struct GenderizeConfig {
    /// Endpoint the queries are sent to.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Proxy URI per scheme (`http`, `https` or `all`).
    pub proxies: BTreeMap<String, String>,
}

impl GenderizeConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GenderizeConfigBuilder {
        GenderizeConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GENDERIZE_BASE_URL` (optional): Custom endpoint
    /// - `GENDERIZE_TIMEOUT` (optional): Request timeout in seconds
    /// - `GENDERIZE_HTTP_PROXY` (optional): Proxy for `http` requests
    /// - `GENDERIZE_HTTPS_PROXY` (optional): Proxy for `https` requests
    /// - `GENDERIZE_ALL_PROXY` (optional): Proxy for all requests
    pub fn from_env() -> GenderizeResult<Self> {
        let mut builder = GenderizeConfigBuilder::new();

        if let Ok(base_url) = std::env::var("GENDERIZE_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("GENDERIZE_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        for (scheme, var) in [
            ("http", "GENDERIZE_HTTP_PROXY"),
            ("https", "GENDERIZE_HTTPS_PROXY"),
            ("all", "GENDERIZE_ALL_PROXY"),
        ] {
            if let Ok(uri) = std::env::var(var) {
                builder = builder.proxy(scheme, uri);
            }
        }

        builder.build()
    }
}

impl Default for GenderizeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxies: BTreeMap::new(),
        }
    }
}

impl std::fmt::Debug for GenderizeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let proxies: BTreeMap<&str, String> = self
            .proxies
            .iter()
            .map(|(scheme, uri)| (scheme.as_str(), redact_userinfo(uri)))
            .collect();

        f.debug_struct("GenderizeConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("proxies", &proxies)
            .finish()
    }
}

/// Hides the `user:password@` part of a proxy URI.
fn redact_userinfo(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(url) if !url.username().is_empty() || url.password().is_some() => {
            let host = url.host_str().unwrap_or_default();
            match url.port() {
                Some(port) => format!("{}://[REDACTED]@{}:{}", url.scheme(), host, port),
                None => format!("{}://[REDACTED]@{}", url.scheme(), host),
            }
        }
        Ok(_) => uri.to_string(),
        Err(_) => "[UNPARSABLE]".to_string(),
    }
}

/// Builder for `GenderizeConfig`.
#[derive(Default)]
pub struct GenderizeConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    proxies: BTreeMap<String, String>,
}

impl GenderizeConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Routes requests for `scheme` through the proxy at `uri`.
    pub fn proxy(mut self, scheme: impl Into<String>, uri: impl Into<String>) -> Self {
        self.proxies
            .insert(scheme.into().to_ascii_lowercase(), uri.into());
        self
    }

    /// Replaces the whole proxy mapping.
    pub fn proxies<K, V>(mut self, proxies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.proxies = proxies
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .collect();
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> GenderizeResult<GenderizeConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GenderizeError::configuration(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(GenderizeError::configuration("Timeout must be non-zero"));
        }

        for (scheme, uri) in &self.proxies {
            proxy_for(scheme, uri).map_err(GenderizeError::configuration)?;
        }

        Ok(GenderizeConfig {
            base_url,
            timeout,
            proxies: self.proxies,
        })
    }
}
