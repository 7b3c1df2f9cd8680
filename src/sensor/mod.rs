pub mod client;
pub mod models;
pub mod wire;

pub use client::SensorClient;
pub use models::{OrderBy, SensorReading, SensorSeries, SensorType, SeriesQuery, UnknownSensorType};
