// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reaction to the directory selector.
//!
//! Every selection change recomputes both charts from scratch: the result
//! set is reloaded and rebuilt with no caching in between. Failures never
//! reach the page; they are logged and the charts come back empty.

use crate::source::ResultSource;
use bench_dashboard_charts::{build_charts, ChartOptions, ChartPair};
use std::time::Instant;
use tracing::{debug, error, warn};

/// Whether a selection names a listable directory directly below the base
/// directory. Hidden names are rejected like path separators.
pub fn is_plain_directory_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\', '\0'])
}

/// Compute both charts for the selected result directory.
///
/// An empty selection returns empty charts without touching `source`.
pub fn charts_for_selection(
    source: &dyn ResultSource,
    selection: Option<&str>,
    options: &ChartOptions,
) -> ChartPair {
    let directory = match selection.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => {
            debug!("No result directory selected");
            return ChartPair::empty();
        }
    };

    if !is_plain_directory_name(directory) {
        warn!(directory, "Rejected result directory selection");
        return ChartPair::empty();
    }

    let started = Instant::now();
    let results = match source.load(directory) {
        Ok(results) => results,
        Err(err) if err.is_missing_data() => {
            warn!(directory, error = %err, "No benchmark results to chart");
            metrics::counter!("dashboard_load_failures_total", "kind" => "missing_data")
                .increment(1);
            return ChartPair::empty();
        }
        Err(err) => {
            error!(directory, error = %err, "Failed to load benchmark results");
            metrics::counter!("dashboard_load_failures_total", "kind" => "error").increment(1);
            return ChartPair::empty();
        }
    };

    let charts = build_charts(&results, options);
    metrics::histogram!("dashboard_chart_build_seconds").record(started.elapsed().as_secs_f64());
    debug!(
        directory,
        records = results.len(),
        series = charts.time.data.len(),
        "Charts recomputed"
    );
    charts
}
