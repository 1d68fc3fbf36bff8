//! Station data sources.
//!
//! The remote gauge API provides the full station dataset and answers
//! structured queries (by notation, or by distance from a point). A fixture
//! source serves the same interface from a local JSON file.

mod client;
mod dto;
mod error;
mod fixture;
mod provider;

pub use client::{GaugeApiClient, GaugeApiConfig};
pub use dto::{RawStation, StationsResponse, convert_stations};
pub use error::SourceError;
pub use fixture::FixtureStationSource;
pub use provider::{StationQuery, StationSource};
