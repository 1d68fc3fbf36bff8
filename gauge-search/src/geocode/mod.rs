//! Postcode geocoding.
//!
//! Used as the fallback when a search term matches no station names: the
//! term is treated as a postcode and, if it resolves, stations near it are
//! searched instead.

mod client;
mod error;

pub use client::{Geocoder, PostcodeClient, PostcodeConfig};
pub use error::GeocodeError;
