// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart specification types.
//!
//! These serialize to the figure JSON Plotly.js expects
//! (`{"data": [...], "layout": {...}}`), so the browser side only has to
//! hand them to `Plotly.react`.

use serde::{Deserialize, Serialize};

/// Plotly trace type used for every series.
pub const TRACE_TYPE: &str = "scatter";

/// Plotly draw mode used for every series.
pub const TRACE_MODE: &str = "lines+markers";

/// A text label (`{"text": ...}` in Plotly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Label text.
    pub text: String,
}

impl Title {
    /// Create a label.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    /// Linear axis.
    Linear,
    /// Logarithmic axis.
    Log,
}

/// One chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis label.
    pub title: Title,
    /// Axis scale.
    #[serde(rename = "type")]
    pub scale: AxisScale,
    /// Explicit tick positions; Plotly picks its own when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<u64>>,
}

/// Legend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Legend heading.
    pub title: Title,
}

/// Chart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Chart title.
    pub title: Title,
    /// Horizontal axis.
    pub xaxis: Axis,
    /// Vertical axis.
    pub yaxis: Axis,
    /// Legend.
    pub legend: Legend,
    /// Let the figure follow its container size.
    pub autosize: bool,
}

/// One line-with-markers series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Plotly trace type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Plotly draw mode.
    pub mode: String,
    /// Legend label (the solver identity).
    pub name: String,
    /// Batch sizes, ascending.
    pub x: Vec<u64>,
    /// Metric values, aligned with `x`.
    pub y: Vec<f64>,
}

impl Series {
    /// Create an empty line-with-markers series.
    pub fn lines_with_markers(name: impl Into<String>) -> Self {
        Self {
            kind: TRACE_TYPE.to_string(),
            mode: TRACE_MODE.to_string(),
            name: name.into(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Append one point.
    pub fn push(&mut self, x: u64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }
}

/// A complete chart: its series and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Series in legend order.
    pub data: Vec<Series>,
    /// Layout.
    pub layout: Layout,
}

impl ChartSpec {
    /// Legend labels in order.
    pub fn series_names(&self) -> Vec<&str> {
        self.data.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a series by name.
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.data.iter().find(|s| s.name == name)
    }
}

/// The two charts shown for one result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPair {
    /// Execution time against batch size.
    pub time: ChartSpec,
    /// Residual against batch size.
    pub residual: ChartSpec,
}
