//! River gauging station search.
//!
//! Finds gauging stations to show on a map, given a station, river or
//! catchment name, a postcode, or a point. The station dataset is fetched
//! once per session and searched in memory; unmatched terms fall back to a
//! postcode radius search.

pub mod app;
pub mod domain;
pub mod geocode;
pub mod search;
pub mod source;
pub mod stations;

#[cfg(test)]
mod test_support;

pub use app::GaugeSearch;
