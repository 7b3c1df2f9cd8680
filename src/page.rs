//! Static dashboard page.
//!
//! The page embeds every chart file written by
//! [`FileChartWidget`](crate::widget::FileChartWidget) and draws them with
//! Chart.js on load. Panels without data get a short notice instead of a
//! canvas.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::dashboard::{PanelOutcome, PanelReport};
use crate::error::RenderError;
use crate::widget::chart_path;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";
const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 400;

/// Render the dashboard HTML.
///
/// `charts` maps render targets to their chart configuration. A rendered
/// panel whose target is missing from `charts` is shown as unavailable.
#[must_use]
pub fn render_page(
    title: &str,
    reports: &[PanelReport],
    charts: &BTreeMap<String, Value>,
) -> String {
    let mut sections = String::new();
    for report in reports {
        let panel = &report.panel;
        let heading = escape_html(&format!("{} ({})", panel.label, panel.unit));

        let body = match (&report.outcome, charts.contains_key(&panel.target)) {
            (PanelOutcome::Rendered { .. }, true) => format!(
                r#"<canvas id="{}" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}"></canvas>"#,
                escape_html(&panel.target)
            ),
            (PanelOutcome::NoData, _) => r#"<p class="empty">No data available</p>"#.to_string(),
            _ => r#"<p class="empty">Chart unavailable</p>"#.to_string(),
        };

        sections.push_str(&format!(
            "    <section>\n      <h2>{heading}</h2>\n      {body}\n    </section>\n"
        ));
    }

    // `</` inside a script element would end it early.
    let charts_json = serde_json::to_string(charts)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="{CHART_JS_URL}"></script>
  <style>
    body {{ font-family: system-ui, -apple-system, sans-serif; background: #f8fafc; color: #1e293b; margin: 0; }}
    main {{ max-width: 900px; margin: 0 auto; padding: 1.5rem; }}
    section {{ background: #ffffff; border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }}
    h1 {{ font-size: 1.25rem; font-weight: 600; }}
    h2 {{ font-size: 1rem; font-weight: 600; margin: 0 0 0.75rem; }}
    .empty {{ color: #64748b; }}
  </style>
</head>
<body>
  <main>
    <h1>{title}</h1>
{sections}  </main>
  <script>
    const charts = {charts_json};
    for (const [target, config] of Object.entries(charts)) {{
      const canvas = document.getElementById(target);
      if (canvas) {{
        new Chart(canvas.getContext('2d'), config);
      }}
    }}
  </script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Collect the chart files for rendered panels and write `index.html`.
///
/// A chart file that is missing or unreadable is logged and left out.
///
/// # Errors
///
/// Returns `RenderError::Io` if the page itself cannot be written.
pub async fn write_page(
    output_dir: &Path,
    title: &str,
    reports: &[PanelReport],
) -> Result<PathBuf, RenderError> {
    let mut charts = BTreeMap::new();
    for report in reports.iter().filter(|r| r.is_rendered()) {
        let target = &report.panel.target;
        match read_chart(&chart_path(output_dir, target)).await {
            Ok(config) => {
                charts.insert(target.clone(), config);
            }
            Err(e) => {
                tracing::warn!(chart = %target, error = %e, "Skipping unreadable chart file");
            }
        }
    }

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join("index.html");
    tokio::fs::write(&path, render_page(title, reports, &charts)).await?;

    tracing::debug!(path = %path.display(), charts = charts.len(), "Dashboard page written");
    Ok(path)
}

async fn read_chart(path: &Path) -> Result<Value, RenderError> {
    let raw = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&raw)?)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
