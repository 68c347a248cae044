//! Timetable HTTP client.
//!
//! Issues `route.json` queries and converts the responses to domain
//! connections. Each call is exactly one request; failures are returned,
//! never retried.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Connection, JourneyQuery};

use super::convert::convert_route;
use super::error::TimetableError;
use super::types::RouteResponse;

/// Default base URL for the timetable API.
pub const DEFAULT_BASE_URL: &str = "https://search.ch/timetable/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// Base URL for the API (defaults to search.ch)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TimetableConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timetable API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TimetableClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch connections for a query.
    ///
    /// Returns at most `query.count()` connections in the order the service
    /// sent them.
    pub async fn fetch(&self, query: &JourneyQuery) -> Result<Vec<Connection>, TimetableError> {
        let response = self.fetch_raw(query).await?;

        let mut connections = convert_route(&response);
        connections.truncate(query.count());

        debug!(
            from = query.origin(),
            to = query.destination(),
            at = %query.departure().timestamp(),
            requested = query.count(),
            returned = connections.len(),
            "Fetched connections"
        );

        Ok(connections)
    }

    /// Get the raw route response (for debugging/testing).
    pub async fn fetch_raw(&self, query: &JourneyQuery) -> Result<RouteResponse, TimetableError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TimetableError::Closed)?;

        let url = format!("{}/route.json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TimetableError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TimetableError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TimetableError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Query string for a `route.json` request.
///
/// The service is always asked for departures, never arrivals.
pub fn query_params(query: &JourneyQuery) -> [(&'static str, String); 6] {
    let departure = query.departure();
    [
        ("from", query.origin().to_string()),
        ("to", query.destination().to_string()),
        ("date", departure.query_date()),
        ("time", departure.query_time()),
        ("time_type", "depart".to_string()),
        ("num", query.count().to_string()),
    ]
}
