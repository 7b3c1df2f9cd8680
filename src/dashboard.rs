//! Startup dispatcher: one fetch-and-render pipeline per chart panel.
//!
//! Pipelines run concurrently on the calling task and never wait on each
//! other. Each one owns its render target and its series, and reports its
//! own outcome, so a failing sensor leaves the other charts untouched.

use futures::future::join_all;

use crate::chart::{render_chart, RenderOutcome};
use crate::sensor::{SensorClient, SensorType};
use crate::widget::ChartWidget;

/// A sensor type bound to the render target and caption it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPanel {
    pub sensor_type: SensorType,
    pub target: String,
    pub label: String,
    pub unit: String,
}

impl ChartPanel {
    pub fn new(
        sensor_type: SensorType,
        target: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            sensor_type,
            target: target.into(),
            label: label.into(),
            unit: unit.into(),
        }
    }

    /// The standard panel for a sensor type.
    #[must_use]
    pub fn default_for(sensor_type: SensorType) -> Self {
        match sensor_type {
            SensorType::Temperature => {
                Self::new(sensor_type, "temperatureChart", "Temperature", "°C")
            }
            SensorType::Humidity => Self::new(sensor_type, "humidityChart", "Humidity", "%"),
            SensorType::Light => Self::new(sensor_type, "lightChart", "Light Intensity", "lux"),
        }
    }

    /// One panel per sensor type.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        SensorType::ALL.into_iter().map(Self::default_for).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    Rendered { points: usize },
    /// Fetch degraded to an empty series; nothing was drawn.
    NoData,
    /// The widget failed to draw.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelReport {
    pub panel: ChartPanel,
    pub outcome: PanelOutcome,
}

impl PanelReport {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, PanelOutcome::Rendered { .. })
    }
}

pub struct Dashboard<W> {
    client: SensorClient,
    widget: W,
    panels: Vec<ChartPanel>,
}

impl<W: ChartWidget> Dashboard<W> {
    pub fn new(client: SensorClient, widget: W, panels: Vec<ChartPanel>) -> Self {
        Self {
            client,
            widget,
            panels,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Run every panel's pipeline and collect the reports in panel order.
    pub async fn run(&self) -> Vec<PanelReport> {
        tracing::info!(panels = self.panels.len(), "Starting chart pipelines");

        let reports = join_all(self.panels.iter().map(|panel| self.run_panel(panel))).await;

        let rendered = reports.iter().filter(|r| r.is_rendered()).count();
        tracing::info!(
            rendered,
            skipped = reports.len() - rendered,
            "Chart pipelines finished"
        );

        reports
    }

    async fn run_panel(&self, panel: &ChartPanel) -> PanelReport {
        tracing::debug!(sensor = %panel.sensor_type, chart = %panel.target, "Creating chart");

        // One warning per degraded panel: a failed fetch is reported here
        // instead of through `fetch_series`.
        let series = match self.client.try_fetch_series(panel.sensor_type).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(
                    sensor = %panel.sensor_type,
                    error = %e,
                    network = e.is_network(),
                    "Failed to fetch sensor series, chart not created"
                );
                return PanelReport {
                    panel: panel.clone(),
                    outcome: PanelOutcome::NoData,
                };
            }
        };

        let outcome = match render_chart(
            &series,
            &panel.target,
            &panel.label,
            &panel.unit,
            &self.widget,
        )
        .await
        {
            Ok(RenderOutcome::Drawn { points }) => {
                tracing::info!(
                    sensor = %panel.sensor_type,
                    chart = %panel.target,
                    points,
                    "Chart rendered"
                );
                PanelOutcome::Rendered { points }
            }
            Ok(RenderOutcome::Skipped) => {
                tracing::warn!(sensor = %panel.sensor_type, "No data found, chart not created");
                PanelOutcome::NoData
            }
            Err(e) => {
                tracing::warn!(
                    sensor = %panel.sensor_type,
                    chart = %panel.target,
                    error = %e,
                    "Failed to render chart"
                );
                PanelOutcome::Failed(e.to_string())
            }
        };

        PanelReport {
            panel: panel.clone(),
            outcome,
        }
    }
}
