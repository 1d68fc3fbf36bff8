//! Environment Agency gauge API client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::StationRecord;

use super::dto::{StationsResponse, convert_stations};
use super::error::SourceError;
use super::provider::{StationQuery, StationSource};

/// Default base URL for the gauge API.
const DEFAULT_BASE_URL: &str = "https://environment.data.gov.uk/flood-monitoring";

/// Upper bound on stations requested in a full fetch. The API pages at 500
/// by default, which would silently truncate the dataset.
const DEFAULT_FETCH_LIMIT: usize = 10_000;

/// Configuration for the gauge API client.
#[derive(Debug, Clone)]
pub struct GaugeApiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// `_limit` sent with the full-dataset request
    pub fetch_limit: usize,
}

impl GaugeApiConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the full-fetch page size.
    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    fn stations_url(&self) -> String {
        format!("{}/id/stations", self.base_url)
    }
}

impl Default for GaugeApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the gauge station API.
#[derive(Debug, Clone)]
pub struct GaugeApiClient {
    http: reqwest::Client,
    config: GaugeApiConfig,
}

impl GaugeApiClient {
    /// Create a new gauge API client.
    pub fn new(config: GaugeApiConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// GET the stations endpoint with the given query parameters.
    async fn get_stations(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Vec<StationRecord>, SourceError> {
        let url = self.config.stations_url();
        debug!(%url, ?params, "fetching stations");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: StationsResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Json {
                message: e.to_string(),
            })?;

        Ok(convert_stations(response.items))
    }
}

impl StationSource for GaugeApiClient {
    async fn fetch_all(&self) -> Result<Vec<StationRecord>, SourceError> {
        let params = [("_limit", self.config.fetch_limit.to_string())];
        self.get_stations(&params).await
    }

    async fn fetch_by_query(&self, query: &StationQuery) -> Result<Vec<StationRecord>, SourceError> {
        self.get_stations(&query.params()).await
    }
}
