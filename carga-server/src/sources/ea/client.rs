//! Energía Abierta HTTP client.
//!
//! Fetches the paginated charge-point listing. All pages of a refresh
//! are fetched and joined before any conversion happens, so the
//! normalizer only ever sees a consolidated collection; partial data
//! never reaches the core.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::Station;
use crate::sources::error::SourceError;

use super::convert::convert_charge_point;
use super::types::EaListing;

/// Default base URL for the Energía Abierta API.
const DEFAULT_BASE_URL: &str = "https://apis.energiaabierta.cl/v1/electrolineras";

/// Default maximum concurrent page requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default page size.
const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for the Energía Abierta client.
#[derive(Debug, Clone)]
pub struct EaConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent page requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Records per page
    pub page_size: u32,
}

impl EaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent page requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }
}

/// Energía Abierta API client.
///
/// Uses a semaphore to bound concurrent page requests and avoid rate
/// limiting during the paginated fan-out.
#[derive(Debug, Clone)]
pub struct EaClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
    semaphore: Arc<Semaphore>,
}

impl EaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: EaConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            SourceError::NotConfigured("API key contains invalid header characters".to_string())
        })?;
        headers.insert("x-api-key", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            page_size: config.page_size,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch one page of the charge-point listing.
    pub async fn fetch_page(&self, page: u32) -> Result<EaListing, SourceError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| {
            SourceError::NotConfigured("semaphore closed".to_string())
        })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("page", page.to_string()),
                ("pageSize", self.page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }

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

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch the complete listing and normalize it.
    ///
    /// The first page reveals the total page count; the remaining pages
    /// are fetched concurrently (bounded by the semaphore) and awaited
    /// together. Any failed page fails the whole refresh: a partially
    /// loaded station set must not reach the planner.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, SourceError> {
        let first = self.fetch_page(1).await?;
        let total_pages = first.total_pages;

        let mut pages = vec![first];

        if total_pages > 1 {
            let rest = join_all((2..=total_pages).map(|page| self.fetch_page(page))).await;
            for result in rest {
                pages.push(result?);
            }
        }

        let mut stations = Vec::new();
        let mut without_coordinates = 0usize;

        for page in &pages {
            for record in &page.data {
                let station = convert_charge_point(record);
                if !station.is_locatable() {
                    without_coordinates += 1;
                }
                stations.push(station);
            }
        }

        if without_coordinates > 0 {
            warn!(
                count = without_coordinates,
                "charge points arrived without coordinates; they will be skipped by the map and planner"
            );
        }

        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = EaConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60)
            .with_page_size(50);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn config_defaults() {
        let config = EaConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = EaClient::new(EaConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_bad_api_key() {
        let client = EaClient::new(EaConfig::new("line\nbreak"));
        assert!(matches!(client, Err(SourceError::NotConfigured(_))));
    }

    // Integration tests would require a real API key and live HTTP;
    // the conversion logic is covered in convert.rs instead.
}
