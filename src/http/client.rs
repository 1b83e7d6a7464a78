//! HTTP executors
//!
//! `HttpExecutor` is the only I/O seam the fetcher depends on. Tests plug in
//! canned responses; production code uses `ReqwestExecutor`.

use super::types::{KvRequest, KvResponse};
use crate::error::{Error, Result};
use crate::store::ConnectionString;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Executes a single request against a config store
///
/// Implementations return every status as a response; only transport-level
/// failures are errors.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &KvRequest, store: &ConnectionString) -> Result<KvResponse>;
}

#[async_trait]
impl<T: HttpExecutor + ?Sized> HttpExecutor for Arc<T> {
    async fn execute(&self, request: &KvRequest, store: &ConnectionString) -> Result<KvResponse> {
        (**self).execute(request, store).await
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("kvconfig/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Executor backed by a `reqwest` client
pub struct ReqwestExecutor {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestExecutor {
    /// Create an executor with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create an executor with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &KvRequest, store: &ConnectionString) -> Result<KvResponse> {
        let mut req = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status();

        debug!(
            store = store.id(),
            "{} {} -> {}",
            request.method,
            request.url,
            status.as_u16()
        );

        let mut kv_response = KvResponse::new(status.as_u16());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                kv_response = kv_response.with_header(name.as_str(), value);
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read body: {e}")))?;
        Ok(kv_response.with_body(body))
    }
}

impl std::fmt::Debug for ReqwestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
