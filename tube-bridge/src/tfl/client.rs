//! TfL Unified API HTTP client.
//!
//! Makes a single line-status request per call. There is no retry and no
//! caching: a failed poll is reported to the caller and the next readiness
//! trigger polls afresh.

use std::time::Duration;

use tracing::debug;

use crate::bridge::StatusSource;
use crate::domain::DisruptionRecord;

use super::convert::convert_line_statuses;
use super::error::FetchError;
use super::types::LineGroup;

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Transport modes requested in one combined query.
pub const MODES: [&str; 4] = ["tube", "dlr", "elizabeth-line", "overground"];

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Optional `app_key` for registered applications
    pub app_key: Option<String>,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl TflConfig {
    /// Create a config pointing at the production API, without an app key or timeout.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_key: None,
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL line status client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_key: config.app_key,
        })
    }

    /// URL of the combined line-status query.
    pub fn status_url(&self) -> String {
        format!("{}/line/mode/{}/status", self.base_url, MODES.join(","))
    }

    /// Fetch the raw status response for all requested modes.
    pub async fn get_line_statuses(&self) -> Result<Vec<LineGroup>, FetchError> {
        let url = self.status_url();
        debug!(%url, "requesting line statuses");

        let mut request = self.http.get(&url);
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch statuses and reduce them to the disrupted lines.
    pub async fn fetch_disruptions(&self) -> Result<Vec<DisruptionRecord>, FetchError> {
        let lines = self.get_line_statuses().await?;
        let records = convert_line_statuses(&lines)?;
        debug!(
            lines = lines.len(),
            disrupted = records.len(),
            "line statuses converted"
        );
        Ok(records)
    }
}

impl StatusSource for TflClient {
    async fn fetch(&self) -> Result<Vec<DisruptionRecord>, FetchError> {
        self.fetch_disruptions().await
    }
}
