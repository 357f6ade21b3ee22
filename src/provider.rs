//! Risk data providers
//!
//! A provider resolves once with the ordered list of [`RiskEntry`] values the
//! dashboard renders. [`MockRiskProvider`] simulates a network round trip with a
//! fixed delay; [`HttpRiskProvider`] fetches the same JSON shape from a real
//! endpoint and reports failures through [`FetchError`].

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::risk::{RiskEntry, sample_entries};

/// Default simulated round trip of the mock provider
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Default request timeout of the HTTP provider
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching risk data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected response status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Stable identifier used by the JSON surfaces
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status(_) => "status",
            FetchError::Malformed(_) => "malformed",
        }
    }
}

/// Source of risk entries
#[async_trait]
pub trait RiskDataProvider: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Fetch the ordered risk entries
    async fn fetch_risk_data(&self) -> Result<Vec<RiskEntry>, FetchError>;
}

/// Ordered scores of a fetched assessment
pub fn scores(entries: &[RiskEntry]) -> Vec<f64> {
    entries.iter().map(|entry| entry.score).collect()
}

/// Resolves with fixed entries after a fixed delay. Never fails.
#[derive(Debug, Clone)]
pub struct MockRiskProvider {
    delay: Duration,
    entries: Vec<RiskEntry>,
}

impl MockRiskProvider {
    /// Mock serving the built-in sample
    pub fn new(delay: Duration) -> Self {
        Self::with_entries(delay, sample_entries())
    }

    pub fn with_entries(delay: Duration, entries: Vec<RiskEntry>) -> Self {
        Self { delay, entries }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockRiskProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl RiskDataProvider for MockRiskProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_risk_data(&self) -> Result<Vec<RiskEntry>, FetchError> {
        debug!(delay = ?self.delay, "simulating risk data round trip");
        tokio::time::sleep(self.delay).await;
        Ok(self.entries.clone())
    }
}

/// Fetches a JSON array of risk entries over HTTP
#[derive(Debug, Clone)]
pub struct HttpRiskProvider {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpRiskProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_request_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl RiskDataProvider for HttpRiskProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_risk_data(&self) -> Result<Vec<RiskEntry>, FetchError> {
        debug!(url = %self.url, "fetching risk data");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "risk data request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let entries: Vec<RiskEntry> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        debug!(url = %self.url, count = entries.len(), "risk data received");
        Ok(entries)
    }
}
