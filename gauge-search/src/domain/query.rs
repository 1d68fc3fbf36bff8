//! Station search queries.

use super::station::Notation;

/// What to match stations against. Exactly one shape per call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Stations whose notation matches, resolved by the remote source.
    Identity(Notation),
    /// Stations whose label contains the text, ignoring case.
    Label(String),
    /// Stations within `radius_km` of a point, resolved by the remote source.
    Location { lat: f64, long: f64, radius_km: f64 },
}

impl SearchQuery {
    /// Short name of the query shape, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchQuery::Identity(_) => "identity",
            SearchQuery::Label(_) => "label",
            SearchQuery::Location { .. } => "location",
        }
    }
}
