//! Outbound client for the time service.
//!
//! # Responsibilities
//! - Resolve `{base_url}/time` once at construction
//! - Perform one GET per greeting, bounded by connect and total timeouts
//! - Classify failures for logs; callers treat every variant the same way

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::request::X_REQUEST_ID;
use crate::time::TimeResponse;

/// Failure talking to the time service.
///
/// `InvalidUrl` and `Build` only occur while constructing the client; the
/// remaining variants are the runtime "upstream call failed" cases.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid time service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to time service failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("time service responded with status {0}")]
    Status(StatusCode),

    #[error("malformed time service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUrl(_) | UpstreamError::Build(_) => "setup",
            UpstreamError::Request(e) if e.is_timeout() => "timeout",
            UpstreamError::Request(_) => "request",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
        }
    }
}

/// Fetches the current time from the time service.
#[derive(Debug, Clone)]
pub struct TimeClient {
    client: Client,
    time_url: Url,
    provider_name: String,
}

impl TimeClient {
    /// Build a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            client,
            time_url: time_url(&config.base_url)?,
            provider_name: config.provider_name.clone(),
        })
    }

    /// Fully resolved `/time` endpoint.
    pub fn time_url(&self) -> &Url {
        &self.time_url
    }

    /// Name used when reporting failures to callers.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Fetch the provider's current timestamp, forwarding `request_id` when
    /// given. Only a 2xx response with a `time` string counts as success.
    pub async fn fetch_time(&self, request_id: Option<&str>) -> Result<String, UpstreamError> {
        let mut request = self.client.get(self.time_url.clone());
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await.map_err(UpstreamError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await.map_err(UpstreamError::Request)?;
        let parsed: TimeResponse = serde_json::from_slice(&body)?;

        tracing::debug!(time = %parsed.time, "Received time from upstream");
        Ok(parsed.time)
    }
}

/// Append `time` to the base URL, keeping any path prefix.
fn time_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)?.join("time")
}
