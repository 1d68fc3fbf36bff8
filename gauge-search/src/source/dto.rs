//! Raw station records as served by the gauge API, and their conversion
//! into domain records.
//!
//! The API is loose about shapes: a text field may arrive as a string, an
//! array of strings (stations that were renamed carry every label), or an
//! object with a `label`. Coordinates occasionally arrive as strings or
//! arrays too. The deserializers here take the first usable value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::domain::{GridPoint, LatLong, Notation, StationLocation, StationRecord};

/// Wrapper for station list responses.
#[derive(Debug, Deserialize)]
pub struct StationsResponse {
    pub items: Vec<RawStation>,
}

/// A station as it appears on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStation {
    #[serde(default, deserialize_with = "text_value")]
    pub notation: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub river_name: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub catchment_name: Option<String>,
    #[serde(default, deserialize_with = "number_value")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "number_value")]
    pub long: Option<f64>,
    #[serde(default, deserialize_with = "number_value")]
    pub easting: Option<f64>,
    #[serde(default, deserialize_with = "number_value")]
    pub northing: Option<f64>,
    #[serde(default, deserialize_with = "text_value")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub grid_reference: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub town: Option<String>,
    #[serde(default, deserialize_with = "text_value")]
    pub date_opened: Option<String>,
    /// Everything else, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawStation {
    /// Convert into a domain record.
    ///
    /// Returns `None` when the station has no usable notation or label.
    pub fn into_record(self) -> Option<StationRecord> {
        let notation = Notation::parse(self.notation.as_deref()?).ok()?;
        let label = self.label?;

        let lat_long = match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some(LatLong::new(lat, long)).filter(LatLong::is_valid),
            _ => None,
        };
        let grid = match (self.easting, self.northing) {
            (Some(easting), Some(northing)) => Some(GridPoint { easting, northing }),
            _ => None,
        };

        let date_opened = self
            .date_opened
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Some(StationRecord {
            notation,
            label,
            river: self.river_name,
            catchment: self.catchment_name,
            location: StationLocation::from_parts(lat_long, grid),
            status: self.status.map(|s| status_label(&s)),
            grid_reference: self.grid_reference,
            town: self.town,
            date_opened,
            attributes: self.extra,
        })
    }
}

/// Convert a batch of raw stations, dropping those that can't be identified.
pub fn convert_stations(raw: Vec<RawStation>) -> Vec<StationRecord> {
    let total = raw.len();
    let records: Vec<StationRecord> = raw
        .into_iter()
        .filter_map(|r| {
            let notation = r.notation.clone();
            let record = r.into_record();
            if record.is_none() {
                debug!(?notation, "dropping station without notation or label");
            }
            record
        })
        .collect();

    if records.len() < total {
        debug!(
            kept = records.len(),
            dropped = total - records.len(),
            "converted stations"
        );
    }

    records
}

/// Status is sometimes a vocabulary URI such as
/// `http://environment.data.gov.uk/flood-monitoring/def/core/statusActive`.
fn status_label(raw: &str) -> String {
    let tail = raw.rsplit('/').next().unwrap_or(raw);
    match tail.strip_prefix("status") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => tail.to_string(),
    }
}

fn text_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(first_text(&value))
}

fn number_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(first_number(&value))
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        Value::Object(map) => map.get("label").and_then(first_text),
        _ => None,
    }
}

fn first_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Array(items) => items.iter().find_map(first_number),
        _ => None,
    }
}
