//! Free-text station search with postcode fallback.
//!
//! A search runs through these stages, strictly in order:
//!
//! ```text
//! NameSearching ─┬─ hits ──────────────────────────────▶ Ranking
//!                └─ none ─▶ PostcodeLookup ─┬─ point ─▶ RadiusSearching ─▶ Ranking
//!                                           └─ none ──▶ NoMatch
//! ```
//!
//! Failures at any stage end the search at `NoMatch`. The caller always
//! gets an outcome it can display, never an error.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{LatLong, SearchQuery, StationRecord};
use crate::geocode::Geocoder;
use crate::source::StationSource;
use crate::stations::{StationCache, StationMatcher};

use super::config::SearchConfig;
use super::rank::{deduplicate, paginate, rank_by_label};
use super::summary::summarize;

/// Where a search outcome's stations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    /// Label match, sorted by label.
    Label,
    /// Radius search around a geocoded postcode, in source order.
    Location,
    /// Nothing matched and the term could not be located.
    NoMatch,
}

/// The displayable result of a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Stations to show, at most one page unless "show all" was requested.
    pub displayed: Vec<StationRecord>,
    /// How many matching stations were left off the page.
    pub remainder: usize,
    /// Human-readable description of the result.
    pub summary: String,
    pub origin: ResultOrigin,
    /// The geocoded point, for location searches.
    pub near: Option<LatLong>,
}

impl SearchOutcome {
    /// The explicit empty outcome.
    pub fn no_match() -> Self {
        Self {
            displayed: Vec::new(),
            remainder: 0,
            summary: summarize(0, 0, None),
            origin: ResultOrigin::NoMatch,
            near: None,
        }
    }

    /// Total number of matching stations.
    pub fn total(&self) -> usize {
        self.displayed.len() + self.remainder
    }
}

/// Search pipeline stages, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStage {
    NameSearching,
    PostcodeLookup,
    RadiusSearching,
    Ranking,
    NoMatch,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStage::NameSearching => "name-searching",
            SearchStage::PostcodeLookup => "postcode-lookup",
            SearchStage::RadiusSearching => "radius-searching",
            SearchStage::Ranking => "ranking",
            SearchStage::NoMatch => "no-match",
        };
        f.write_str(name)
    }
}

/// Turns user-typed search terms into displayable results.
pub struct SearchOrchestrator<S, G> {
    matcher: StationMatcher<S>,
    geocoder: Arc<G>,
    config: SearchConfig,
}

impl<S: StationSource, G: Geocoder> SearchOrchestrator<S, G> {
    /// Create a new orchestrator.
    pub fn new(cache: Arc<StationCache<S>>, geocoder: Arc<G>, config: SearchConfig) -> Self {
        Self {
            matcher: StationMatcher::new(cache),
            geocoder,
            config,
        }
    }

    /// Search for stations by name, falling back to treating the term as a
    /// postcode.
    ///
    /// Returns `None` without doing anything when the trimmed term is
    /// shorter than the configured minimum. With `show_all` the page limit
    /// is lifted.
    pub async fn search_by(&self, text: &str, show_all: bool) -> Option<SearchOutcome> {
        let term = text.trim();
        if term.chars().count() < self.config.min_query_chars {
            debug!(term, "search term too short, ignoring");
            return None;
        }

        enter(SearchStage::NameSearching, term);
        let outcome = match self
            .matcher
            .match_stations(&SearchQuery::Label(term.to_string()))
            .await
        {
            Ok(hits) if !hits.is_empty() => self.rank(hits, term, None, show_all),
            Ok(_) => self.search_near(term, show_all).await,
            Err(e) => {
                warn!(term, error = %e, "name search failed");
                no_match(term)
            }
        };

        Some(outcome)
    }

    /// Geocode `term` and search around it.
    ///
    /// Radius hits with no location at all are dropped. A station located
    /// only on the projected grid is kept.
    async fn search_near(&self, term: &str, show_all: bool) -> SearchOutcome {
        enter(SearchStage::PostcodeLookup, term);
        let point = match self.geocoder.lookup(term).await {
            Ok(Some(point)) => point,
            Ok(None) => return no_match(term),
            Err(e) => {
                warn!(term, error = %e, "postcode lookup failed");
                return no_match(term);
            }
        };

        enter(SearchStage::RadiusSearching, term);
        let query = SearchQuery::Location {
            lat: point.latitude,
            long: point.longitude,
            radius_km: self.config.radius_km,
        };
        match self.matcher.match_stations(&query).await {
            Ok(hits) => {
                let located = hits.into_iter().filter(|s| s.location.is_some()).collect();
                self.rank(located, term, Some(point), show_all)
            }
            Err(e) => {
                warn!(term, error = %e, "radius search failed");
                no_match(term)
            }
        }
    }

    /// De-duplicate, order and paginate results.
    ///
    /// Label results are sorted by label; location results keep the
    /// source's distance order.
    fn rank(
        &self,
        hits: Vec<StationRecord>,
        term: &str,
        near: Option<LatLong>,
        show_all: bool,
    ) -> SearchOutcome {
        enter(SearchStage::Ranking, term);
        let hits = deduplicate(hits);
        let (ordered, origin) = match near {
            Some(_) => (hits, ResultOrigin::Location),
            None => (rank_by_label(hits), ResultOrigin::Label),
        };

        let total = ordered.len();
        let limit = (!show_all).then_some(self.config.page_limit);
        let page = paginate(ordered, limit);
        let summary = summarize(
            total,
            page.displayed.len(),
            near.is_some().then_some(term),
        );

        debug!(term, total, shown = page.displayed.len(), "search complete");

        SearchOutcome {
            displayed: page.displayed,
            remainder: page.remainder,
            summary,
            origin,
            near,
        }
    }
}

fn enter(stage: SearchStage, term: &str) {
    debug!(%stage, term, "search stage");
}

fn no_match(term: &str) -> SearchOutcome {
    enter(SearchStage::NoMatch, term);
    SearchOutcome::no_match()
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
