//! Station resolution over the session-cached collection.
//!
//! The full station dataset is fetched once, on first demand, and every
//! lookup after that is answered from memory. Structured queries (by
//! notation, or near a point) still go to the remote source.

mod cache;
mod error;
mod index;
mod matcher;

pub use cache::{StationCache, StationCollection};
pub use error::StationsError;
pub use index::StationIndex;
pub use matcher::StationMatcher;
