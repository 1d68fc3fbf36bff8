//! Geocoder error types.

/// Transport and protocol failures from the postcode geocoder.
///
/// A postcode that simply isn't known is not an error; lookups report it
/// as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The configured base URL can't carry a postcode path segment
    #[error("invalid geocoder URL: {0}")]
    InvalidUrl(String),
}
