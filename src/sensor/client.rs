use reqwest::Client;

use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};
use crate::sensor::models::{SensorSeries, SensorType, SeriesQuery};
use crate::sensor::wire;

/// HTTP client for the sensor readings backend.
///
/// One GET per call. No retries, no caching, no timeout.
pub struct SensorClient {
    http_client: Client,
    base_url: String,
    query: SeriesQuery,
}

impl SensorClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Client` if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(config.skip_tls_verify)
            .build()
            .map_err(|e| AppError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.clone(),
            query: config.query.clone(),
        })
    }

    /// Fetch a series, degrading every failure to an empty series.
    ///
    /// Network errors, non-2xx responses and bodies that break the wire
    /// contract are logged as warnings. This never fails.
    pub async fn fetch_series(&self, sensor_type: SensorType) -> SensorSeries {
        match self.try_fetch_series(sensor_type).await {
            Ok(series) => {
                tracing::debug!(
                    sensor = %sensor_type,
                    points = series.len(),
                    "Sensor series fetched"
                );
                series
            }
            Err(e) => {
                tracing::warn!(
                    sensor = %sensor_type,
                    error = %e,
                    network = e.is_network(),
                    "Failed to fetch sensor series, treating as empty"
                );
                SensorSeries::empty(sensor_type)
            }
        }
    }

    /// Fetch and decode a series, keeping the failure reason.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` on transport failure, `FetchError::Status`
    /// on a non-2xx response and `FetchError::MalformedResponse` if the body
    /// does not match the wire contract.
    pub async fn try_fetch_series(
        &self,
        sensor_type: SensorType,
    ) -> Result<SensorSeries, FetchError> {
        let url = format!("{}{}", self.base_url, sensor_type.endpoint());
        tracing::debug!(sensor = %sensor_type, url = %url, "Fetching sensor series");

        let response = self
            .http_client
            .get(&url)
            .query(&self.query.pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read response body: {e}")))?;

        wire::decode(sensor_type, &body).inspect_err(|e| {
            tracing::debug!(
                sensor = %sensor_type,
                error = %e,
                body_preview = %String::from_utf8_lossy(&body)
                    .chars()
                    .take(500)
                    .collect::<String>(),
                "Response did not match the readings contract"
            );
        })
    }
}
