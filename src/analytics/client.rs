//! Analytics HTTP Client
//!
//! Issues the single GET that starts every dashboard cycle.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::payload::AnalyticsPayload;

/// Path of the analytics endpoint, relative to the configured base URL
pub const ANALYTICS_PATH: &str = "/api/portfolio/analytics";

/// Anything that can produce a fresh analytics payload
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// Fetch and parse one payload. Never cached.
    async fn fetch(&self) -> AnalyticsResult<AnalyticsPayload>;
}

/// Configuration for the HTTP analytics client
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Base URL of the portfolio server (e.g., "http://localhost:8001")
    pub base_url: String,
    /// Optional request timeout; `None` waits for the transport to give up
    pub request_timeout: Option<Duration>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout: None,
        }
    }
}

impl AnalyticsConfig {
    /// Full URL of the analytics endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYTICS_PATH)
    }
}

/// reqwest-backed analytics source
pub struct HttpAnalyticsClient {
    client: Client,
    config: AnalyticsConfig,
}

impl HttpAnalyticsClient {
    /// Create a new client with the given configuration
    pub fn new(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsClient {
    async fn fetch(&self) -> AnalyticsResult<AnalyticsPayload> {
        let url = self.config.endpoint();
        tracing::debug!(url = %url, "Fetching portfolio analytics");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                AnalyticsError::Timeout
            } else if e.is_connect() {
                AnalyticsError::Unavailable(url.clone())
            } else {
                AnalyticsError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AnalyticsError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        let payload: AnalyticsPayload = serde_json::from_str(&body)?;

        Ok(payload)
    }
}

/// Analytics fetch errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Analytics endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Analytics endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid analytics payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
