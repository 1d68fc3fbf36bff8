//! Composition root.
//!
//! `GaugeSearch` owns the one station cache for the session and wires it
//! into the index, matcher and search pipeline. It is the surface the map
//! views depend on.

use std::sync::Arc;

use crate::domain::{LatLong, SearchQuery, StationRecord};
use crate::geocode::Geocoder;
use crate::search::{SearchConfig, SearchOrchestrator, SearchOutcome};
use crate::source::StationSource;
use crate::stations::{
    StationCache, StationCollection, StationIndex, StationMatcher, StationsError,
};

/// Shared station search services.
///
/// Cloning is cheap; clones share the same cache.
pub struct GaugeSearch<S, G> {
    inner: Arc<Inner<S, G>>,
}

struct Inner<S, G> {
    cache: Arc<StationCache<S>>,
    index: StationIndex<S>,
    matcher: StationMatcher<S>,
    orchestrator: SearchOrchestrator<S, G>,
}

impl<S, G> Clone for GaugeSearch<S, G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StationSource, G: Geocoder> GaugeSearch<S, G> {
    /// Wire up search services over a source and geocoder.
    pub fn new(source: S, geocoder: G, config: SearchConfig) -> Self {
        let cache = Arc::new(StationCache::new(source));
        let geocoder = Arc::new(geocoder);

        Self {
            inner: Arc::new(Inner {
                index: StationIndex::new(Arc::clone(&cache)),
                matcher: StationMatcher::new(Arc::clone(&cache)),
                orchestrator: SearchOrchestrator::new(Arc::clone(&cache), geocoder, config),
                cache,
            }),
        }
    }

    /// Whether the station collection has finished loading.
    pub fn has_cached_stations(&self) -> bool {
        self.inner.cache.has_cached_stations()
    }

    /// The full station collection.
    pub async fn stations_collection(&self) -> Result<Arc<StationCollection>, StationsError> {
        self.inner.index.collection().await
    }

    pub async fn station_names(&self) -> Result<Vec<String>, StationsError> {
        self.inner.index.station_names().await
    }

    pub async fn river_names(&self) -> Result<Vec<String>, StationsError> {
        self.inner.index.river_names().await
    }

    pub async fn catchment_names(&self) -> Result<Vec<String>, StationsError> {
        self.inner.index.catchment_names().await
    }

    /// The station with exactly this notation, if any.
    pub async fn station_with_id(
        &self,
        notation: &str,
    ) -> Result<Option<StationRecord>, StationsError> {
        self.inner.index.station_with_id(notation).await
    }

    /// Stations from the loaded collection within `radius_km` of `centre`,
    /// nearest first. Unlike a location query this never leaves the cache.
    pub async fn stations_near(
        &self,
        centre: LatLong,
        radius_km: f64,
    ) -> Result<Vec<StationRecord>, StationsError> {
        self.inner.index.stations_near(centre, radius_km).await
    }

    pub async fn match_stations(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<StationRecord>, StationsError> {
        self.inner.matcher.match_stations(query).await
    }

    /// Run the free-text search pipeline. `None` for too-short input.
    pub async fn search_by(&self, text: &str, show_all: bool) -> Option<SearchOutcome> {
        self.inner.orchestrator.search_by(text, show_all).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureStationSource;
    use crate::test_support::{CountingSource, ScriptedGeocoder, sample_path, station, station_at};

    fn sample() -> GaugeSearch<FixtureStationSource, ScriptedGeocoder> {
        let source = FixtureStationSource::load(sample_path()).unwrap();
        GaugeSearch::new(source, ScriptedGeocoder::new(), SearchConfig::default())
    }

    #[tokio::test]
    async fn all_views_share_one_fetch() {
        let source = CountingSource::new(vec![station("A", "Alpha"), station("B", "Beta")]);
        let app = GaugeSearch::new(source.clone(), ScriptedGeocoder::new(), SearchConfig::default());
        let clone = app.clone();

        assert!(!app.has_cached_stations());

        let (names, rivers, outcome) = futures::join!(
            app.station_names(),
            clone.river_names(),
            app.search_by("alpha", false),
        );

        assert_eq!(names.unwrap(), vec!["Alpha", "Beta"]);
        assert!(rivers.unwrap().is_empty());
        assert_eq!(outcome.unwrap().total(), 1);
        assert_eq!(source.fetch_all_calls(), 1);
        assert!(app.has_cached_stations());
        assert!(clone.has_cached_stations());
    }

    #[tokio::test]
    async fn sample_lookups() {
        let app = sample();

        let avonmouth = app.station_with_id("E72639").await.unwrap().unwrap();
        assert_eq!(avonmouth.label, "Avonmouth Portbury");
        assert!(
            app.station_with_id("522039999999999999999")
                .await
                .unwrap()
                .is_none()
        );

        assert!(app.river_names().await.unwrap().contains(&"Tide".to_string()));
        assert!(
            app.catchment_names()
                .await
                .unwrap()
                .contains(&"England - South Coast".to_string())
        );

        let collection = app.stations_collection().await.unwrap();
        assert_eq!(app.station_names().await.unwrap().len(), collection.len());
    }

    #[tokio::test]
    async fn stations_near_uses_cached_collection() {
        let source = CountingSource::new(vec![
            station_at("FAR", "Far", 51.60, -2.59),
            station("NOWHERE", "No location"),
            station_at("NEAR", "Near", 51.46, -2.59),
        ]);
        let app = GaugeSearch::new(source.clone(), ScriptedGeocoder::new(), SearchConfig::default());

        let near = app
            .stations_near(LatLong::new(51.4545, -2.5879), 20.0)
            .await
            .unwrap();
        let ids: Vec<&str> = near.iter().map(|s| s.notation.as_str()).collect();
        assert_eq!(ids, vec!["NEAR", "FAR"]);

        app.stations_near(LatLong::new(51.4545, -2.5879), 5.0)
            .await
            .unwrap();
        assert_eq!(source.fetch_all_calls(), 1);
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn sample_stations_near_bristol() {
        let app = sample();
        let bristol = LatLong::new(51.4545, -2.5879);

        let near = app.stations_near(bristol, 10.0).await.unwrap();
        assert!(!near.is_empty());
        assert!(near.iter().all(|s| s.distance_km(bristol).unwrap() <= 10.0));
    }

    #[tokio::test]
    async fn sample_label_match() {
        let app = sample();

        let matches = app
            .match_stations(&SearchQuery::Label("avonmouth".into()))
            .await
            .unwrap();
        assert!(!matches.is_empty());
        assert!(
            matches
                .iter()
                .all(|s| s.label.to_lowercase().contains("avonmouth"))
        );
    }
}
