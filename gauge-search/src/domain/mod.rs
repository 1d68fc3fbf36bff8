//! Domain types for gauging station search.
//!
//! Station records are converted from raw API data once, at the source
//! boundary. Everything downstream can rely on a non-empty notation and
//! label, and on river/catchment names being either absent or non-blank.

mod geo;
mod query;
mod station;

pub use geo::{GridPoint, LatLong, haversine_km};
pub use query::SearchQuery;
pub use station::{InvalidNotation, Notation, StationLocation, StationRecord, stations_within};
