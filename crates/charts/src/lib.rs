// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart specifications for benchmark result sets.
//!
//! # Quick Start
//!
//! ```
//! use bench_dashboard_charts::{build_charts, ChartOptions};
//! use bench_dashboard_core::{BenchmarkRecord, ResultSet};
//!
//! let results = ResultSet::new(vec![
//!     BenchmarkRecord::new("B", 16, 1.0, 0.1),
//!     BenchmarkRecord::new("A", 8, 0.5, 0.05),
//! ]);
//! let charts = build_charts(&results, &ChartOptions::default());
//! assert_eq!(charts.time.series_names(), vec!["A", "B"]);
//! ```
//!
//! # Modules
//!
//! - [`figure`] - Serializable Plotly figure types
//! - [`builder`] - Result set to chart conversion
//! - [`html`] - Pages hosting the charts

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod builder;
pub mod figure;
pub mod html;

pub use builder::{build_chart, build_charts, ChartOptions, Metric, TickPolicy, LEGACY_TICK_VALUES};
pub use figure::{Axis, AxisScale, ChartPair, ChartSpec, Layout, Legend, Series, Title};
