//! Station matching by identity, label or location.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{SearchQuery, StationRecord};
use crate::source::{StationQuery, StationSource};

use super::cache::StationCache;
use super::error::StationsError;

/// Matches queries against the station collection.
///
/// Labels are matched locally against the cached collection. Identity and
/// location queries go to the remote source, which applies its own
/// normalisation and distance ranking.
pub struct StationMatcher<S> {
    cache: Arc<StationCache<S>>,
}

impl<S: StationSource> StationMatcher<S> {
    pub fn new(cache: Arc<StationCache<S>>) -> Self {
        Self { cache }
    }

    /// Find the stations matching `query`.
    ///
    /// Label results come back in collection order; ranking them is the
    /// caller's job. Location results keep the source's order.
    pub async fn match_stations(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<StationRecord>, StationsError> {
        let matches = match query {
            SearchQuery::Identity(notation) => {
                self.remote(&StationQuery::Notation(notation.as_str().to_string()))
                    .await?
            }
            SearchQuery::Label(text) => self.by_label(text).await?,
            SearchQuery::Location {
                lat,
                long,
                radius_km,
            } => {
                self.remote(&StationQuery::Near {
                    lat: *lat,
                    long: *long,
                    dist_km: *radius_km,
                })
                .await?
            }
        };

        debug!(kind = query.kind(), count = matches.len(), "matched stations");
        Ok(matches)
    }

    async fn by_label(&self, text: &str) -> Result<Vec<StationRecord>, StationsError> {
        let stations = self
            .cache
            .collection()
            .await
            .map_err(StationsError::Collection)?;

        let needle = text.to_lowercase();
        Ok(stations
            .iter()
            .filter(|s| s.label_contains(&needle))
            .cloned()
            .collect())
    }

    async fn remote(&self, query: &StationQuery) -> Result<Vec<StationRecord>, StationsError> {
        self.cache
            .source()
            .fetch_by_query(query)
            .await
            .map_err(|e| StationsError::Query(Arc::new(e)))
    }
}
