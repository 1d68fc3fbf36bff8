//! postcodes.io geocoder client.

use std::future::Future;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::domain::LatLong;

use super::error::GeocodeError;

/// Default base URL for postcodes.io.
const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Resolves free text (a postcode) to a coordinate.
pub trait Geocoder: Send + Sync + 'static {
    /// Look up `text`.
    ///
    /// `Ok(None)` means the text isn't a known postcode. Errors are reserved
    /// for transport failures.
    fn lookup(&self, text: &str)
    -> impl Future<Output = Result<Option<LatLong>, GeocodeError>> + Send;
}

/// Response envelope from postcodes.io.
#[derive(Debug, Deserialize)]
struct PostcodeResponse {
    result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Configuration for the postcode client.
#[derive(Debug, Clone)]
pub struct PostcodeConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PostcodeConfig {
    /// Create a config pointing at postcodes.io.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
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

impl Default for PostcodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the postcodes.io lookup endpoint.
#[derive(Debug, Clone)]
pub struct PostcodeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PostcodeClient {
    /// Create a new postcode client.
    pub fn new(config: PostcodeConfig) -> Result<Self, GeocodeError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| GeocodeError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(GeocodeError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build `{base}/postcodes/{postcode}` with the postcode percent-encoded.
    fn lookup_url(&self, postcode: &str) -> Result<Url, GeocodeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("postcodes")
            .push(postcode);
        Ok(url)
    }
}

impl Geocoder for PostcodeClient {
    async fn lookup(&self, text: &str) -> Result<Option<LatLong>, GeocodeError> {
        let postcode = text.trim();
        if postcode.is_empty() {
            return Ok(None);
        }

        let url = self.lookup_url(postcode)?;
        debug!(%url, "geocoding postcode");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        // Unknown or malformed postcodes come back as 404
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_lookup(&body)
    }
}

/// Extract the coordinate from a lookup response body.
///
/// Terminated postcodes can come back with null coordinates.
fn parse_lookup(body: &str) -> Result<Option<LatLong>, GeocodeError> {
    let response: PostcodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

    Ok(response.result.and_then(|r| match (r.latitude, r.longitude) {
        (Some(lat), Some(long)) => Some(LatLong::new(lat, long)).filter(LatLong::is_valid),
        _ => None,
    }))
}
