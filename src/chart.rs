//! Line-chart configuration and the render step.
//!
//! [`ChartConfig`] serializes to the configuration object a Chart.js line
//! chart accepts, so the JSON can be handed to the widget as-is.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::sensor::SensorSeries;
use crate::widget::ChartWidget;

/// Format used for x-axis labels. Timestamps are shown in UTC.
pub const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BORDER_COLOR: &str = "rgba(75, 192, 192, 1)";
const BACKGROUND_COLOR: &str = "rgba(75, 192, 192, 0.2)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub point_radius: u32,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl Axis {
    fn titled(text: impl Into<String>) -> Self {
        Self {
            title: AxisTitle {
                display: true,
                text: text.into(),
            },
        }
    }
}

/// Build the line-chart configuration for a series.
///
/// Labels and values keep the series' order; nothing is re-sorted.
#[must_use]
pub fn build_chart_config(series: &SensorSeries, label: &str, unit: &str) -> ChartConfig {
    ChartConfig {
        chart_type: "line".to_string(),
        data: ChartData {
            labels: series
                .timestamps()
                .map(|t| t.format(LABEL_FORMAT).to_string())
                .collect(),
            datasets: vec![Dataset {
                label: format!("{label} ({unit})"),
                data: series.values().collect(),
                border_color: BORDER_COLOR.to_string(),
                background_color: BACKGROUND_COLOR.to_string(),
                border_width: 2,
                point_radius: 4,
                tension: 0.4,
            }],
        },
        options: ChartOptions {
            responsive: false,
            maintain_aspect_ratio: false,
            scales: Scales {
                x: Axis::titled("Timestamp"),
                y: Axis::titled(format!("Value ({unit})")),
            },
        },
    }
}

/// What [`render_chart`] did with a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Series was empty; the widget was not touched.
    Skipped,
    Drawn { points: usize },
}

/// Render a series into `target` through the injected widget.
///
/// An empty series short-circuits before any configuration is built.
///
/// # Errors
///
/// Returns the widget's `RenderError` if drawing fails.
pub async fn render_chart<W>(
    series: &SensorSeries,
    target: &str,
    label: &str,
    unit: &str,
    widget: &W,
) -> Result<RenderOutcome, RenderError>
where
    W: ChartWidget + ?Sized,
{
    if series.is_empty() {
        return Ok(RenderOutcome::Skipped);
    }

    let config = build_chart_config(series, label, unit);
    widget.draw(target, &config).await?;

    Ok(RenderOutcome::Drawn {
        points: series.len(),
    })
}
