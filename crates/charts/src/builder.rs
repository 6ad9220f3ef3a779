// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart construction from a result set.
//!
//! [`build_charts`] is a pure function: records are grouped by solver, the
//! solver identities are sorted to fix series (and so legend and colour)
//! order, and each group becomes one series on the time chart and one on
//! the residual chart.

use crate::figure::{Axis, AxisScale, ChartPair, ChartSpec, Layout, Legend, Series, Title};
use bench_dashboard_core::{BenchmarkRecord, ResultSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Fixed power-of-two tick list for result sets that share the usual batch sizes.
pub const LEGACY_TICK_VALUES: [u64; 7] = [8, 16, 32, 64, 128, 256, 1024];

/// Placement of x-axis ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// One tick per distinct batch size in the data.
    #[default]
    DataDriven,
    /// A fixed list of tick positions.
    Fixed(Vec<u64>),
}

impl TickPolicy {
    /// Build a policy from an optional configured tick list.
    pub fn from_config(tick_values: Option<Vec<u64>>) -> Self {
        match tick_values {
            Some(values) if !values.is_empty() => TickPolicy::Fixed(values),
            _ => TickPolicy::DataDriven,
        }
    }

    fn tick_values(&self, results: &ResultSet) -> Option<Vec<u64>> {
        match self {
            TickPolicy::DataDriven => {
                let sizes = results.batch_sizes();
                (!sizes.is_empty()).then_some(sizes)
            }
            TickPolicy::Fixed(values) => Some(values.clone()),
        }
    }
}

/// Options for chart construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// X-axis tick placement.
    #[serde(default)]
    pub tick_policy: TickPolicy,
}

/// The quantity plotted against batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Median execution time.
    Time,
    /// Average L2 residual.
    Residual,
}

impl Metric {
    /// Chart title.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Time => "Execution time (1 analyze + 1 factorize + 1 solve)",
            Metric::Residual => "Numerical accuracy",
        }
    }

    /// Y-axis label.
    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Time => "Median Time (s)",
            Metric::Residual => "Residual",
        }
    }

    /// Value of this metric for one record.
    pub fn value(self, record: &BenchmarkRecord) -> f64 {
        match self {
            Metric::Time => record.time_median,
            Metric::Residual => record.residuals_l2_avg,
        }
    }
}

/// Build one chart for a metric.
pub fn build_chart(results: &ResultSet, metric: Metric, options: &ChartOptions) -> ChartSpec {
    let mut groups: BTreeMap<&str, Vec<&BenchmarkRecord>> = BTreeMap::new();
    for record in results {
        groups
            .entry(record.solver_type.as_str())
            .or_default()
            .push(record);
    }

    let data = groups
        .into_iter()
        .map(|(solver, mut runs)| {
            runs.sort_by_key(|r| r.batch_size);
            let mut series = Series::lines_with_markers(solver);
            for run in runs {
                series.push(run.batch_size, metric.value(run));
            }
            series
        })
        .collect();

    ChartSpec {
        data,
        layout: Layout {
            title: Title::new(metric.title()),
            xaxis: Axis {
                title: Title::new("Batch Size"),
                scale: AxisScale::Log,
                tickvals: options.tick_policy.tick_values(results),
            },
            yaxis: Axis {
                title: Title::new(metric.axis_label()),
                scale: AxisScale::Log,
                tickvals: None,
            },
            legend: Legend {
                title: Title::new("Solver"),
            },
            autosize: true,
        },
    }
}

/// Build the time and residual charts for a result set.
///
/// An empty result set yields two charts without series.
pub fn build_charts(results: &ResultSet, options: &ChartOptions) -> ChartPair {
    let pair = ChartPair {
        time: build_chart(results, Metric::Time, options),
        residual: build_chart(results, Metric::Residual, options),
    };
    debug!(
        records = results.len(),
        series = pair.time.data.len(),
        "Charts built"
    );
    pair
}

impl ChartPair {
    /// Two charts without series, as shown before anything is selected.
    pub fn empty() -> Self {
        build_charts(&ResultSet::empty(), &ChartOptions::default())
    }

    /// Whether neither chart has any series.
    pub fn is_empty(&self) -> bool {
        self.time.data.is_empty() && self.residual.data.is_empty()
    }
}
