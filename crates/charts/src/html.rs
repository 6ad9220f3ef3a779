// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTML hosting for chart specifications.
//!
//! Charts are drawn client-side by Plotly.js. Each chart sits in a panel with
//! a 16:9 aspect ratio that follows the page width.

use crate::figure::{ChartPair, ChartSpec};
use std::fmt::Write;

/// Plotly.js bundle loaded by every page.
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Stylesheet shared by the static and interactive pages.
pub const STYLESHEET: &str = r#"
body {
  margin: 0;
  padding: 16px 24px;
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  color: #1f2933;
  background: #ffffff;
}
h1 { font-size: 1.6rem; margin: 0 0 16px; }
h2 { font-size: 1.2rem; margin: 24px 0 8px; }
.controls { margin-bottom: 8px; }
.controls select { font-size: 1rem; padding: 4px 8px; min-width: 240px; }
.chart-panel { width: 100%; aspect-ratio: 16 / 9; }
"#;

/// Plotly config: resize with the container.
pub const PLOTLY_CONFIG: &str = r#"{"responsive": true}"#;

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serialize a chart for embedding inside a `<script>` element.
pub fn figure_json(chart: &ChartSpec) -> serde_json::Result<String> {
    Ok(serde_json::to_string(chart)?.replace("</", "<\\/"))
}

/// Render a self-contained page showing both charts of one result set.
pub fn static_page(title: &str, charts: &ChartPair) -> serde_json::Result<String> {
    let time = figure_json(&charts.time)?;
    let residual = figure_json(&charts.residual)?;
    let title = escape_html(title);

    let mut page = String::new();
    writeln!(page, "<!DOCTYPE html>").unwrap();
    writeln!(page, "<html lang=\"en\">").unwrap();
    writeln!(page, "<head>").unwrap();
    writeln!(page, "<meta charset=\"utf-8\">").unwrap();
    writeln!(page, "<title>{}</title>", title).unwrap();
    writeln!(page, "<script src=\"{}\"></script>", PLOTLY_JS_URL).unwrap();
    writeln!(page, "<style>{}</style>", STYLESHEET).unwrap();
    writeln!(page, "</head>").unwrap();
    writeln!(page, "<body>").unwrap();
    writeln!(page, "<h1>{}</h1>", title).unwrap();
    writeln!(page, "<h2>Execution Time vs Batch Size</h2>").unwrap();
    writeln!(page, "<div id=\"time-chart\" class=\"chart-panel\"></div>").unwrap();
    writeln!(page, "<h2>Residual vs Batch Size</h2>").unwrap();
    writeln!(page, "<div id=\"residual-chart\" class=\"chart-panel\"></div>").unwrap();
    writeln!(page, "<script>").unwrap();
    writeln!(page, "const config = {};", PLOTLY_CONFIG).unwrap();
    writeln!(page, "const time = {};", time).unwrap();
    writeln!(page, "const residual = {};", residual).unwrap();
    writeln!(
        page,
        "Plotly.newPlot(\"time-chart\", time.data, time.layout, config);"
    )
    .unwrap();
    writeln!(
        page,
        "Plotly.newPlot(\"residual-chart\", residual.data, residual.layout, config);"
    )
    .unwrap();
    writeln!(page, "</script>").unwrap();
    writeln!(page, "</body>").unwrap();
    writeln!(page, "</html>").unwrap();

    Ok(page)
}
