// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! The interactive dashboard page.
//!
//! The page holds the directory dropdown and two empty chart panels. On load
//! and on every dropdown change it fetches `/api/v1/charts` and redraws both
//! panels with `Plotly.react`.

use bench_dashboard_charts::html::{escape_html, PLOTLY_CONFIG, PLOTLY_JS_URL, STYLESHEET};
use std::fmt::Write;

/// Page heading.
pub const PAGE_TITLE: &str = "Benchmark Results Visualization";

const SCRIPT: &str = r#"
const selector = document.getElementById("directory-selector");

async function update(directory) {
  const url = "/api/v1/charts?directory=" + encodeURIComponent(directory);
  const response = await fetch(url);
  const charts = await response.json();
  Plotly.react("time-chart", charts.time.data, charts.time.layout, config);
  Plotly.react("residual-chart", charts.residual.data, charts.residual.layout, config);
}

selector.addEventListener("change", (event) => update(event.target.value));
update(selector.value);
"#;

/// Render the page for the given directories and initial selection.
pub fn interactive_page(directories: &[String], selected: Option<&str>) -> String {
    let mut page = String::new();
    writeln!(page, "<!DOCTYPE html>").unwrap();
    writeln!(page, "<html lang=\"en\">").unwrap();
    writeln!(page, "<head>").unwrap();
    writeln!(page, "<meta charset=\"utf-8\">").unwrap();
    writeln!(page, "<title>{}</title>", PAGE_TITLE).unwrap();
    writeln!(page, "<script src=\"{}\"></script>", PLOTLY_JS_URL).unwrap();
    writeln!(page, "<style>{}</style>", STYLESHEET).unwrap();
    writeln!(page, "</head>").unwrap();
    writeln!(page, "<body>").unwrap();
    writeln!(page, "<h1>{}</h1>", PAGE_TITLE).unwrap();
    writeln!(page, "<div class=\"controls\">").unwrap();
    writeln!(page, "<label for=\"directory-selector\">Result set</label>").unwrap();
    writeln!(page, "<select id=\"directory-selector\">").unwrap();

    if directories.is_empty() {
        writeln!(page, "<option value=\"\">(no result directories)</option>").unwrap();
    }
    for directory in directories {
        let name = escape_html(directory);
        let attr = if Some(directory.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        writeln!(page, "<option value=\"{}\"{}>{}</option>", name, attr, name).unwrap();
    }

    writeln!(page, "</select>").unwrap();
    writeln!(page, "</div>").unwrap();
    writeln!(page, "<h2>Execution Time vs Batch Size</h2>").unwrap();
    writeln!(page, "<div id=\"time-chart\" class=\"chart-panel\"></div>").unwrap();
    writeln!(page, "<h2>Residual vs Batch Size</h2>").unwrap();
    writeln!(page, "<div id=\"residual-chart\" class=\"chart-panel\"></div>").unwrap();
    writeln!(page, "<script>").unwrap();
    writeln!(page, "const config = {};", PLOTLY_CONFIG).unwrap();
    writeln!(page, "{}", SCRIPT).unwrap();
    writeln!(page, "</script>").unwrap();
    writeln!(page, "</body>").unwrap();
    writeln!(page, "</html>").unwrap();
    page
}
