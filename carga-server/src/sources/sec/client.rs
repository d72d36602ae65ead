//! SEC live-feed HTTP client.
//!
//! The feed is one unpaginated endpoint returning every socket row in
//! the country, refreshed upstream every few minutes.

use crate::domain::Station;
use crate::sources::error::SourceError;

use super::convert::convert_rows;
use super::types::SecSocketRow;

/// Default base URL for the live feed.
const DEFAULT_BASE_URL: &str =
    "https://sec.cl/sgc/api/electrolineras/estado-conectores";

/// Configuration for the SEC live-feed client.
#[derive(Debug, Clone)]
pub struct SecConfig {
    /// Base URL for the feed (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SecConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SecConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// SEC live-feed client.
#[derive(Debug, Clone)]
pub struct SecClient {
    http: reqwest::Client,
    base_url: String,
}

impl SecClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SecConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the full socket feed and normalize it into stations.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        let response = self.http.get(&self.base_url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let rows: Vec<SecSocketRow> =
            serde_json::from_str(&body).map_err(|e| SourceError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_rows(&rows))
    }
}
