//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::instrument;

use super::TransportError;

/// HTTP GET request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request path, relative to the transport's base URL.
    pub path: String,
    /// Query parameters in send order. Keys may repeat.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers. Names are lowercase when produced by reqwest.
    ///
    /// One value per name: when the server repeats a header, the last
    /// occurrence is kept.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Looks up a header value, ignoring the case of the name.
    ///
    /// Names from reqwest are already lowercase, so each name matches at most
    /// one entry. Hand-built maps holding the same name in two casings resolve
    /// to an arbitrary one of them.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP GET request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Builds a reqwest proxy for one `scheme -> uri` entry.
///
/// Recognised schemes are `http`, `https` and `all`.
pub(crate) fn proxy_for(scheme: &str, uri: &str) -> Result<Proxy, String> {
    let proxy = match scheme.to_ascii_lowercase().as_str() {
        "http" => Proxy::http(uri),
        "https" => Proxy::https(uri),
        "all" => Proxy::all(uri),
        other => return Err(format!("unsupported proxy scheme '{}'", other)),
    };
    proxy.map_err(|e| format!("invalid proxy URI for '{}': {}", scheme, e))
}

/// HTTP transport implementation using reqwest.
///
/// One `reqwest::Client` is built up front and reused for every request so
/// that pooled connections survive between queries.
pub struct HttpTransportImpl {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        proxies: &BTreeMap<String, String>,
    ) -> Result<Self, TransportError> {
        let mut builder = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .tcp_keepalive(Duration::from_secs(60));

        for (scheme, uri) in proxies {
            let proxy =
                proxy_for(scheme, uri).map_err(|message| TransportError::Connection { message })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| TransportError::Connection {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(path = %request.path, params = request.query.len()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request.path);

        let mut req_builder = self.client.get(&url).query(&request.query);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: self.timeout,
                }
            } else if e.is_connect() {
                TransportError::Connection {
                    message: e.to_string(),
                }
            } else {
                TransportError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout: self.timeout,
                    }
                } else {
                    TransportError::InvalidResponse {
                        message: e.to_string(),
                    }
                }
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpTransportImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportImpl")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
