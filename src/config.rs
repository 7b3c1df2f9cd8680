use std::env;
use std::path::PathBuf;

use crate::dashboard::ChartPanel;
use crate::sensor::{OrderBy, SensorType, SeriesQuery};

#[derive(Debug, Clone)]
pub struct Config {
    // Sensor backend
    pub api_base_url: String,
    pub skip_tls_verify: bool,
    pub query: SeriesQuery,

    // Dashboard output
    pub sensors: Vec<SensorType>,
    pub output_dir: PathBuf,
    pub title: String,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = get("SENSOR_API_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let skip_tls_verify = match get("SENSOR_SKIP_TLS_VERIFY") {
            Some(raw) => raw
                .to_lowercase()
                .parse::<bool>()
                .map_err(|_| ConfigError::invalid("SENSOR_SKIP_TLS_VERIFY", &raw))?,
            None => false,
        };

        let order_by = get("SENSOR_ORDER_BY")
            .map(|raw| {
                raw.parse::<OrderBy>()
                    .map_err(|_| ConfigError::invalid("SENSOR_ORDER_BY", &raw))
            })
            .transpose()?;

        let sensors = match get("DASHBOARD_SENSORS") {
            Some(raw) => parse_sensor_list(&raw)?,
            None => SensorType::ALL.to_vec(),
        };

        Ok(Self {
            api_base_url,
            skip_tls_verify,
            query: SeriesQuery {
                start_date: get("SENSOR_START_DATE"),
                end_date: get("SENSOR_END_DATE"),
                order_by,
            },
            sensors,
            output_dir: get("DASHBOARD_OUTPUT_DIR")
                .map_or_else(|| PathBuf::from("dashboard"), PathBuf::from),
            title: get("DASHBOARD_TITLE").unwrap_or_else(|| "Sensor Dashboard".to_string()),
        })
    }

    /// Chart panels for the configured sensors, in configuration order.
    #[must_use]
    pub fn panels(&self) -> Vec<ChartPanel> {
        self.sensors
            .iter()
            .copied()
            .map(ChartPanel::default_for)
            .collect()
    }
}

fn parse_sensor_list(raw: &str) -> Result<Vec<SensorType>, ConfigError> {
    let mut sensors = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let sensor = tag
            .parse::<SensorType>()
            .map_err(|_| ConfigError::invalid("DASHBOARD_SENSORS", tag))?;
        if !sensors.contains(&sensor) {
            sensors.push(sensor);
        }
    }

    if sensors.is_empty() {
        return Err(ConfigError::invalid("DASHBOARD_SENSORS", raw));
    }
    Ok(sensors)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
        }
    }
}
