use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of sensors the backend exposes under `/api/{type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Temperature,
    Humidity,
    Light,
}

impl SensorType {
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Light];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
        }
    }

    /// Path of the readings endpoint, relative to the backend origin.
    #[must_use]
    pub fn endpoint(self) -> String {
        format!("/api/{}", self.as_str())
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sensor type '{0}' (expected temperature, humidity or light)")]
pub struct UnknownSensorType(pub String);

impl FromStr for SensorType {
    type Err = UnknownSensorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "light" => Ok(Self::Light),
            _ => Err(UnknownSensorType(s.to_string())),
        }
    }
}

/// One normalized reading. `value` is always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Readings for one sensor type, in the order the backend returned them.
///
/// Built once per fetch and never mutated afterwards. An empty series means
/// "no data available" and is not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSeries {
    sensor_type: SensorType,
    readings: Vec<SensorReading>,
}

impl SensorSeries {
    #[must_use]
    pub fn new(sensor_type: SensorType, readings: Vec<SensorReading>) -> Self {
        Self {
            sensor_type,
            readings,
        }
    }

    #[must_use]
    pub fn empty(sensor_type: SensorType) -> Self {
        Self::new(sensor_type, Vec::new())
    }

    #[must_use]
    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    #[must_use]
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().map(|r| r.value)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.readings.iter().map(|r| r.timestamp)
    }
}

/// Sort key accepted by the backend's `order-by` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Value,
    Timestamp,
}

impl OrderBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Timestamp => "timestamp",
        }
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "timestamp" => Ok(Self::Timestamp),
            other => Err(other.to_string()),
        }
    }
}

/// Optional filters forwarded to the readings endpoint.
///
/// Dates are passed through verbatim; the backend compares them as strings
/// against its stored timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub order_by: Option<OrderBy>,
}

impl SeriesQuery {
    /// Query-string pairs in backend naming. Unset filters are omitted.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = &self.start_date {
            pairs.push(("start-date", start.clone()));
        }
        if let Some(end) = &self.end_date {
            pairs.push(("end-date", end.clone()));
        }
        if let Some(order_by) = self.order_by {
            pairs.push(("order-by", order_by.as_str().to_string()));
        }
        pairs
    }
}
