//! Station identity and record types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::geo::{GridPoint, LatLong};

/// Error returned when parsing an invalid station notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station notation: {reason}")]
pub struct InvalidNotation {
    reason: &'static str,
}

/// The unique identifier of a gauging station (its "notation").
///
/// Notations are opaque: they are compared exactly and case-sensitively.
/// The only guarantee this type adds is that the value is non-empty and
/// carries no surrounding whitespace.
///
/// # Examples
///
/// ```
/// use gauge_search::domain::Notation;
///
/// let id = Notation::parse("E72639").unwrap();
/// assert_eq!(id.as_str(), "E72639");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(Notation::parse("  E72639 ").unwrap(), id);
///
/// // Blank is rejected
/// assert!(Notation::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Notation(String);

impl Notation {
    /// Parse a notation, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidNotation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidNotation {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidNotation {
                reason: "must not contain control characters",
            });
        }

        Ok(Notation(trimmed.to_string()))
    }

    /// Returns the notation as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notation({})", self.0)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Where a station is, in whichever reference systems the source provided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationLocation {
    /// WGS84 latitude/longitude.
    pub lat_long: Option<LatLong>,
    /// British National Grid easting/northing.
    pub grid: Option<GridPoint>,
}

impl StationLocation {
    /// Build a location from whichever coordinates are present.
    ///
    /// Returns `None` when neither system is available.
    pub fn from_parts(lat_long: Option<LatLong>, grid: Option<GridPoint>) -> Option<Self> {
        if lat_long.is_none() && grid.is_none() {
            return None;
        }
        Some(Self { lat_long, grid })
    }
}

/// A single river-gauging station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Unique identifier, the sole key for lookup and de-duplication.
    pub notation: Notation,
    /// Display name. Not guaranteed unique.
    pub label: String,
    /// River the station sits on, if any.
    pub river: Option<String>,
    /// Hydrological catchment, if any.
    pub catchment: Option<String>,
    /// Position, absent for stations without positional data.
    pub location: Option<StationLocation>,
    /// Operational status label (e.g. "Active").
    pub status: Option<String>,
    /// Ordnance Survey grid reference, e.g. "ST5147077650".
    pub grid_reference: Option<String>,
    /// Nearest town.
    pub town: Option<String>,
    /// When the station opened.
    pub date_opened: Option<NaiveDate>,
    /// Every other attribute of the source record, unchanged.
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl StationRecord {
    /// Create a record with just an identity and a label.
    pub fn new(notation: Notation, label: impl Into<String>) -> Self {
        Self {
            notation,
            label: label.into(),
            river: None,
            catchment: None,
            location: None,
            status: None,
            grid_reference: None,
            town: None,
            date_opened: None,
            attributes: BTreeMap::new(),
        }
    }

    /// The geodetic coordinate, if the station has one.
    pub fn lat_long(&self) -> Option<LatLong> {
        self.location.and_then(|l| l.lat_long)
    }

    /// Great-circle distance from `point` in kilometres.
    ///
    /// `None` for stations without a geodetic coordinate.
    pub fn distance_km(&self, point: LatLong) -> Option<f64> {
        self.lat_long().map(|here| here.distance_km(point))
    }

    /// Case-insensitive substring match on the label.
    ///
    /// `needle` must already be lower-cased.
    pub fn label_contains(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
    }
}

/// Stations within `radius_km` of `centre`, nearest first.
///
/// Stations without a geodetic coordinate are skipped. Ties keep their
/// input order.
pub fn stations_within(
    stations: &[StationRecord],
    centre: LatLong,
    radius_km: f64,
) -> Vec<StationRecord> {
    let mut near: Vec<(f64, &StationRecord)> = stations
        .iter()
        .filter_map(|s| s.distance_km(centre).map(|d| (d, s)))
        .filter(|(d, _)| *d <= radius_km)
        .collect();
    near.sort_by(|a, b| a.0.total_cmp(&b.0));
    near.into_iter().map(|(_, s)| s.clone()).collect()
}
