//! Canonical wire contract for `GET /api/{sensor_type}`.
//!
//! The backend must answer with a JSON array of objects:
//!
//! ```text
//! [
//!   {"timestamp": "2024-01-01T00:00:00Z", "value": 21.5},
//!   {"timestamp": "2024-01-01 00:10:00",  "value": "21.7"}
//! ]
//! ```
//!
//! - `timestamp` is RFC 3339. Naive `YYYY-MM-DD HH:MM:SS` (space or `T`,
//!   optional fraction) is read as UTC.
//! - `value` is a number or a numeric string and must be finite.
//! - Other fields (`id`, `unit`, ...) are ignored.
//!
//! Anything else, including the `{"data": [...]}` wrapper and positional
//! tuples, is rejected. Decoding is all-or-nothing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::sensor::models::{SensorReading, SensorSeries, SensorType};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One entry as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReading {
    pub timestamp: String,
    pub value: WireValue,
}

/// Values arrive as JSON numbers or as decimal strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Number(f64),
    Text(String),
}

impl WireValue {
    fn to_finite(&self) -> Result<f64, String> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("value '{s}' is not a number"))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("value {value} is not finite"))
        }
    }
}

impl WireReading {
    /// Normalize into a [`SensorReading`], or explain why it can't be.
    pub fn normalize(&self) -> Result<SensorReading, String> {
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or_else(|| format!("timestamp '{}' is not a valid date-time", self.timestamp))?;
        let value = self.value.to_finite()?;
        Ok(SensorReading { timestamp, value })
    }
}

/// Parse a backend timestamp into UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Decode a response body into a series.
///
/// # Errors
///
/// Returns `FetchError::MalformedResponse` if the body is not an array of
/// canonical entries, or if any entry has a bad timestamp or value.
pub fn decode(sensor_type: SensorType, body: &[u8]) -> Result<SensorSeries, FetchError> {
    let entries: Vec<Value> = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let readings = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            decode_entry(entry)
                .map_err(|reason| FetchError::MalformedResponse(format!("entry {index}: {reason}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SensorSeries::new(sensor_type, readings))
}

// serde would happily read a `[timestamp, value]` tuple into a struct, so
// the object shape is checked before deserializing.
fn decode_entry(entry: Value) -> Result<SensorReading, String> {
    if !entry.is_object() {
        return Err(format!("expected an object, got {entry}"));
    }
    let wire: WireReading = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    wire.normalize()
}
