use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use url::Url;

use super::classify::{classify, parse_payload, FeedOutcome};
use crate::config::EventsConfig;

/// Error types for feed retrieval
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    #[error("Feed responded with HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid feed endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("Failed to parse feed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Http {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Parse(e.to_string())
    }
}

/// Retrieves the raw feed body.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn get(&self, endpoint: &str) -> Result<String, FeedError>;
}

/// reqwest-backed transport with a per-request timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get(&self, endpoint: &str) -> Result<String, FeedError> {
        let url = Url::parse(endpoint).map_err(|e| FeedError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches and classifies the feed for one render cycle.
#[derive(Clone)]
pub struct FeedClient {
    transport: Arc<dyn FeedTransport>,
    clock: fn() -> DateTime<Utc>,
}

impl FeedClient {
    pub fn new(transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            transport,
            clock: Utc::now,
        }
    }

    pub fn http(timeout: Duration) -> Result<Self, FeedError> {
        Ok(Self::new(Arc::new(HttpTransport::new(timeout)?)))
    }

    /// Replaces the clock used for the classification reference instant.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches the configured endpoint and classifies the response. The
    /// reference instant is read once, after the response has arrived.
    pub async fn fetch(&self, config: &EventsConfig) -> Result<FeedOutcome, FeedError> {
        let body = self.transport.get(&config.api_endpoint).await?;
        let payload = parse_payload(&body)?;
        let now = (self.clock)();

        let outcome = classify(payload, now, config.enable_past_events);
        match &outcome {
            FeedOutcome::Events(c) => tracing::info!(
                container = %config.container_id,
                upcoming = c.upcoming.len(),
                past = c.past.len(),
                "Feed classified"
            ),
            FeedOutcome::EmptyFeed => {
                tracing::info!(container = %config.container_id, "Feed reported no events")
            }
        }
        Ok(outcome)
    }
}
