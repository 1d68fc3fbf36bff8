//! Fixture station source for working without API access.
//!
//! Loads a station list from a JSON file (the same `{"items": [...]}` shape
//! the API returns) and answers structured queries locally.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{LatLong, StationRecord, stations_within};

use super::dto::{StationsResponse, convert_stations};
use super::error::SourceError;
use super::provider::{StationQuery, StationSource};

/// Station source that serves data from a JSON file.
///
/// This is useful for development and testing without network access.
#[derive(Debug, Clone)]
pub struct FixtureStationSource {
    stations: Arc<Vec<StationRecord>>,
}

impl FixtureStationSource {
    /// Load stations from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| SourceError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        Self::from_json(&json)
    }

    /// Parse stations from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let response: StationsResponse =
            serde_json::from_str(json).map_err(|e| SourceError::Json {
                message: e.to_string(),
            })?;

        Ok(Self::from_records(convert_stations(response.items)))
    }

    /// Serve an in-memory list of stations.
    pub fn from_records(stations: Vec<StationRecord>) -> Self {
        Self {
            stations: Arc::new(stations),
        }
    }

    /// Number of stations in the fixture.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the fixture is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Answer a structured query the way the server would.
    fn query(&self, query: &StationQuery) -> Vec<StationRecord> {
        match query {
            StationQuery::Notation(notation) => self
                .stations
                .iter()
                .filter(|s| s.notation.as_str() == notation.trim())
                .cloned()
                .collect(),
            StationQuery::Near { lat, long, dist_km } => {
                stations_within(&self.stations, LatLong::new(*lat, *long), *dist_km)
            }
        }
    }
}

impl StationSource for FixtureStationSource {
    async fn fetch_all(&self) -> Result<Vec<StationRecord>, SourceError> {
        Ok(self.stations.as_ref().clone())
    }

    async fn fetch_by_query(&self, query: &StationQuery) -> Result<Vec<StationRecord>, SourceError> {
        Ok(self.query(query))
    }
}
