use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::chart::ChartConfig;
use crate::error::RenderError;

/// The charting capability a render target is drawn with.
#[async_trait]
pub trait ChartWidget: Send + Sync {
    /// Draw `config` into the render target named `target`.
    async fn draw(&self, target: &str, config: &ChartConfig) -> Result<(), RenderError>;
}

/// Writes each chart configuration to `{output_dir}/{target}.json`.
///
/// The dashboard page picks these files up and hands them to Chart.js.
#[derive(Debug, Clone)]
pub struct FileChartWidget {
    output_dir: PathBuf,
}

impl FileChartWidget {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn chart_path(&self, target: &str) -> PathBuf {
        chart_path(&self.output_dir, target)
    }
}

/// Location of the chart file for `target` under `output_dir`.
#[must_use]
pub fn chart_path(output_dir: &Path, target: &str) -> PathBuf {
    output_dir.join(format!("{target}.json"))
}

#[async_trait]
impl ChartWidget for FileChartWidget {
    async fn draw(&self, target: &str, config: &ChartConfig) -> Result<(), RenderError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self.chart_path(target);
        let json = serde_json::to_vec_pretty(config)?;
        tokio::fs::write(&path, json).await?;

        tracing::debug!(chart = target, path = %path.display(), "Chart written");
        Ok(())
    }
}
