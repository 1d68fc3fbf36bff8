//! The station source abstraction.

use std::future::Future;

use crate::domain::StationRecord;

use super::error::SourceError;

/// A structured query answered by the remote source.
#[derive(Debug, Clone, PartialEq)]
pub enum StationQuery {
    /// Stations with this notation. The server may normalise the value.
    Notation(String),
    /// Stations within `dist_km` of a point, nearest first.
    Near { lat: f64, long: f64, dist_km: f64 },
}

impl StationQuery {
    /// Query-string parameters for this query.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            StationQuery::Notation(notation) => vec![("notation", notation.clone())],
            StationQuery::Near { lat, long, dist_km } => vec![
                ("lat", lat.to_string()),
                ("long", long.to_string()),
                ("dist", dist_km.to_string()),
            ],
        }
    }
}

/// Trait for fetching station data.
///
/// This abstraction allows the cache and matcher to be tested without
/// network access.
pub trait StationSource: Send + Sync + 'static {
    /// Fetch the full station dataset.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<StationRecord>, SourceError>> + Send;

    /// Fetch the stations matching a structured query.
    fn fetch_by_query(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<Vec<StationRecord>, SourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_params() {
        let query = StationQuery::Notation("E72639".to_string());
        assert_eq!(query.params(), vec![("notation", "E72639".to_string())]);
    }

    #[test]
    fn near_params() {
        let query = StationQuery::Near {
            lat: 51.5,
            long: -2.75,
            dist_km: 10.0,
        };
        assert_eq!(
            query.params(),
            vec![
                ("lat", "51.5".to_string()),
                ("long", "-2.75".to_string()),
                ("dist", "10".to_string()),
            ]
        );
    }
}
