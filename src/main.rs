use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensor_dashboard::config::Config;
use sensor_dashboard::dashboard::Dashboard;
use sensor_dashboard::error::AppResult;
use sensor_dashboard::page;
use sensor_dashboard::sensor::SensorClient;
use sensor_dashboard::widget::FileChartWidget;

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Initialize tracing (LOG_FORMAT=json for machine-readable output)
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sensor_dashboard=debug".into()),
        )
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Starting sensor-dashboard...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        base_url = %config.api_base_url,
        output_dir = %config.output_dir.display(),
        sensors = ?config.sensors,
        "Configuration loaded"
    );

    let client = SensorClient::new(&config)?;
    let widget = FileChartWidget::new(&config.output_dir);
    let dashboard = Dashboard::new(client, widget, config.panels());

    let reports = dashboard.run().await;

    let page_path = page::write_page(&config.output_dir, &config.title, &reports).await?;
    tracing::info!(path = %page_path.display(), "Dashboard written");

    Ok(())
}
