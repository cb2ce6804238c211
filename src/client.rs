//! Client factory for the Todo Sync record API.
//!
//! [`Client::new`] normalizes the server URL and hands out
//! per-resource record APIs. Every API returned by
//! [`Client::records`] has already been wrapped with
//! [`BulkRecordApi`], so bulk create is available everywhere without
//! callers touching the wrapper themselves.

use std::time::Duration;

use crate::config::Config;
use crate::records::{BulkRecordApi, HttpRecordApi, RecordError};

/// Timeout for the healthcheck probe.
const HEALTHCHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a Todo Sync server.
///
/// Owns the HTTP connection pool and the normalized server URL.
/// Record APIs are constructed per [`records`](Client::records) call
/// and are independent of each other.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Client {
    /// Creates a client for the given server URL.
    ///
    /// Accepts `http(s)://` URLs, `ws(s)://` URLs (the scheme is
    /// coerced to HTTP), or a bare `host:port`.
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: build_http_url(url),
            api_key: None,
        }
    }

    /// Sets the API key sent as a bearer token on every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Creates a client from loaded configuration.
    ///
    /// Returns an error if no server URL is configured.
    pub fn from_config(config: &Config) -> Result<Self, RecordError> {
        let url = config.server_url.as_ref().ok_or(RecordError::NotConfigured)?;
        let mut client = Self::new(url);
        if let Some(api_key) = &config.api_key {
            client = client.with_api_key(api_key.clone());
        }
        Ok(client)
    }

    /// Returns the normalized server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key, if one is set.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Returns record access for the named resource, with bulk create.
    ///
    /// A new instance is constructed on every call; nothing is cached
    /// per resource name.
    pub fn records<T>(&self, name: &str) -> BulkRecordApi<HttpRecordApi<T>> {
        BulkRecordApi::wrap(HttpRecordApi::new(
            self.http.clone(),
            self.base_url.clone(),
            name,
            self.api_key.clone(),
        ))
    }

    /// Checks whether the server is reachable.
    ///
    /// Probes the healthcheck endpoint; any transport failure or
    /// non-success status counts as unreachable.
    pub async fn check_server(&self) -> bool {
        let url = format!("{}/api/healthcheck", self.base_url);
        let result = self
            .http
            .get(&url)
            .timeout(HEALTHCHECK_TIMEOUT)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Healthcheck failed: {}", e);
                false
            }
        }
    }
}

/// Builds the HTTP base URL from whatever the user configured.
fn build_http_url(url: &str) -> String {
    // Convert ws(s) to http(s) if needed
    let base_url = if url.starts_with("ws://") {
        url.replace("ws://", "http://")
    } else if url.starts_with("wss://") {
        url.replace("wss://", "https://")
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("http://{}", url)
    } else {
        url.to_string()
    };

    base_url.trim_end_matches('/').to_string()
}
