//! Genderize API client.
//!
//! Provides [`GenderizeClient`], which sends names to the API and keeps
//! track of the rate limit window reported by the server.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::instrument;

use crate::config::{GenderizeConfig, GenderizeConfigBuilder};
use crate::errors::{GenderizeError, GenderizeResult};
use crate::observability::{log_query_outcome, log_rate_limit};
use crate::rate_limit::{RateLimitHeaders, RateLimitState};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};
use crate::types::{Names, QueryResult, ResponseStatus};

/// Query parameter repeated once per name.
const NAME_PARAM: &str = "name[]";

/// The Genderize client.
///
/// Holds one HTTP session for all queries and the rate limit state reported
/// by the last successful response. Queries take `&self`, so the client can
/// be shared behind an `Arc`; concurrent queries each commit the window from
/// their own response.
///
/// # Example
///
/// ```rust,no_run
/// use genderize_client::GenderizeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GenderizeClient::new()?;
///
///     let result = client.query(["Emily", "Jack"]).await?;
///     for record in result.iter() {
///         println!("{}: {:?}", record.name, record.gender);
///     }
///
///     println!(
///         "{}/{} requests remaining",
///         client.rate_limit_remaining(),
///         client.rate_limit()
///     );
///     Ok(())
/// }
/// ```
pub struct GenderizeClient {
    config: GenderizeConfig,
    transport: Arc<dyn HttpTransport>,
    state: RwLock<RateLimitState>,
}

impl GenderizeClient {
    /// Creates a new client builder.
    pub fn builder() -> GenderizeClientBuilder {
        GenderizeClientBuilder::new()
    }

    /// Creates a client for the public endpoint with no proxies.
    pub fn new() -> GenderizeResult<Self> {
        GenderizeClientBuilder::new().build()
    }

    /// Creates a client that routes requests through the given proxies.
    ///
    /// Keys are schemes (`http`, `https`, `all`), values are proxy URIs.
    pub fn with_proxies<K, V>(proxies: impl IntoIterator<Item = (K, V)>) -> GenderizeResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        GenderizeClientBuilder::new().proxies(proxies).build()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`GenderizeConfig::from_env`] for the variables read.
    pub fn from_env() -> GenderizeResult<Self> {
        let config = GenderizeConfig::from_env()?;
        GenderizeClientBuilder::from_config(config).build()
    }

    /// Queries the API with one or more names.
    ///
    /// Returns a single record when the API answers with one object and a
    /// list when it answers with an array.
    ///
    /// # Errors
    ///
    /// - [`GenderizeError::Request`] for 400, 429 and 500 responses
    /// - [`GenderizeError::UnexpectedStatus`] for any other non-200 status
    /// - [`GenderizeError::MalformedResponse`] when rate limit headers or the
    ///   body cannot be decoded
    /// - [`GenderizeError::Network`] / [`GenderizeError::Timeout`] when no
    ///   response arrives
    pub async fn query(&self, names: impl Into<Names>) -> GenderizeResult<QueryResult> {
        self.query_names(names.into()).await
    }

    #[instrument(name = "genderize.query", skip(self, names), fields(name_count = names.len()))]
    async fn query_names(&self, names: Names) -> GenderizeResult<QueryResult> {
        let request = self.build_request(&names);
        let outcome = self.execute(request).await;
        log_query_outcome(names.len(), outcome.as_ref().map(QueryResult::len));
        outcome
    }

    fn build_request(&self, names: &Names) -> HttpRequest {
        names.iter().fold(
            HttpRequest::get("").with_header("Accept", "application/json"),
            |request, name| request.with_query(NAME_PARAM, name),
        )
    }

    async fn execute(&self, request: HttpRequest) -> GenderizeResult<QueryResult> {
        let response = self.transport.send(request).await?;
        let received_at = Instant::now();

        if let Err(error) = check_status(&response) {
            self.write_state().mark_request(received_at);
            return Err(error);
        }

        let (headers, result) = decode_success(&response)?;

        let mut state = self.write_state();
        state.mark_request(received_at);
        state.apply(headers);
        log_rate_limit(&state);
        Ok(result)
    }

    /// Requests left in the current window.
    pub fn rate_limit_remaining(&self) -> u32 {
        self.read_state().remaining()
    }

    /// Requests allowed per window.
    pub fn rate_limit(&self) -> u32 {
        self.read_state().ceiling()
    }

    /// Seconds until the window resets, counted down from the last response.
    pub fn rate_limit_time_remaining(&self) -> u64 {
        self.read_state().time_remaining()
    }

    /// Window length in seconds as reported by the last successful response.
    pub fn rate_limit_window(&self) -> u64 {
        self.read_state().window_reset_secs()
    }

    /// True once a successful response has set the rate limit values.
    pub fn is_primed(&self) -> bool {
        self.read_state().is_primed()
    }

    /// Snapshot of the rate limit state.
    pub fn rate_limit_state(&self) -> RateLimitState {
        *self.read_state()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GenderizeConfig {
        &self.config
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RateLimitState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RateLimitState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Maps every non-200 status to its error.
fn check_status(response: &HttpResponse) -> GenderizeResult<()> {
    let status = ResponseStatus::from_code(response.status);
    if status.is_success() {
        return Ok(());
    }

    match status {
        ResponseStatus::Unclassified(code) => Err(GenderizeError::UnexpectedStatus {
            status: code,
            body: String::from_utf8(response.body.clone()).ok(),
        }),
        failure => Err(GenderizeError::Request {
            status: response.status,
            reason: failure.reason().unwrap_or_default().to_string(),
        }),
    }
}

/// Parses the rate limit headers and body of a 200 response.
fn decode_success(response: &HttpResponse) -> GenderizeResult<(RateLimitHeaders, QueryResult)> {
    let headers = RateLimitHeaders::from_response(response)?;
    let result = response.json::<QueryResult>()?;
    Ok((headers, result))
}

impl std::fmt::Debug for GenderizeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenderizeClient")
            .field("config", &self.config)
            .field("rate_limit", &*self.read_state())
            .finish()
    }
}

/// Builder for the Genderize client.
pub struct GenderizeClientBuilder {
    config_builder: GenderizeConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl GenderizeClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: GenderizeConfigBuilder::new(),
            transport: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: GenderizeConfig) -> Self {
        Self {
            config_builder: GenderizeConfigBuilder::new()
                .base_url(config.base_url)
                .timeout(config.timeout)
                .proxies(config.proxies),
            transport: None,
        }
    }

    /// Sets the endpoint URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Routes requests for `scheme` through the proxy at `uri`.
    pub fn proxy(mut self, scheme: impl Into<String>, uri: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.proxy(scheme, uri);
        self
    }

    /// Replaces the whole proxy mapping.
    pub fn proxies<K, V>(mut self, proxies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config_builder = self.config_builder.proxies(proxies);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GenderizeResult<GenderizeClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout, &config.proxies)
                    .map_err(|e| GenderizeError::configuration(e.to_string()))?,
            ),
        };

        Ok(GenderizeClient {
            config,
            transport,
            state: RwLock::new(RateLimitState::new()),
        })
    }
}

impl Default for GenderizeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
