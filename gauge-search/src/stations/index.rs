//! Name lists and identifier lookup over the cached collection.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{LatLong, StationRecord, stations_within};
use crate::source::StationSource;

use super::cache::{StationCache, StationCollection};
use super::error::StationsError;

/// Read-only views derived from the cached station collection.
///
/// Every method waits for the collection to load first.
pub struct StationIndex<S> {
    cache: Arc<StationCache<S>>,
}

impl<S: StationSource> StationIndex<S> {
    pub fn new(cache: Arc<StationCache<S>>) -> Self {
        Self { cache }
    }

    async fn stations(&self) -> Result<Arc<StationCollection>, StationsError> {
        self.cache
            .collection()
            .await
            .map_err(StationsError::Collection)
    }

    /// The full collection, shared.
    pub async fn collection(&self) -> Result<Arc<StationCollection>, StationsError> {
        self.stations().await
    }

    /// Every station label, in collection order.
    pub async fn station_names(&self) -> Result<Vec<String>, StationsError> {
        let stations = self.stations().await?;
        Ok(stations.iter().map(|s| s.label.clone()).collect())
    }

    /// Distinct river names, sorted.
    pub async fn river_names(&self) -> Result<Vec<String>, StationsError> {
        let stations = self.stations().await?;
        Ok(distinct_names(stations.iter().map(|s| s.river.as_deref())))
    }

    /// Distinct catchment names, sorted.
    pub async fn catchment_names(&self) -> Result<Vec<String>, StationsError> {
        let stations = self.stations().await?;
        Ok(distinct_names(stations.iter().map(|s| s.catchment.as_deref())))
    }

    /// The station whose notation is exactly `notation`.
    pub async fn station_with_id(
        &self,
        notation: &str,
    ) -> Result<Option<StationRecord>, StationsError> {
        let stations = self.stations().await?;
        Ok(stations
            .iter()
            .find(|s| s.notation.as_str() == notation)
            .cloned())
    }

    /// Stations within `radius_km` of `centre`, nearest first.
    ///
    /// Stations without a geodetic coordinate are skipped.
    pub async fn stations_near(
        &self,
        centre: LatLong,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, StationsError> {
        let stations = self.stations().await?;
        Ok(stations_within(&stations, centre, radius_km))
    }
}

/// Collect distinct, non-blank names in sorted order.
fn distinct_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    names
        .flatten()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
