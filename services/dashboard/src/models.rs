// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared application state and API payloads.

use crate::config::DashboardConfig;
use crate::source::{FsResultSource, ResultSource};
use bench_dashboard_charts::{ChartOptions, ChartPair};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// State shared by every handler. Immutable after startup.
pub struct AppState {
    /// Result directories.
    pub source: Arc<dyn ResultSource>,
    /// Chart construction options.
    pub chart_options: ChartOptions,
    /// Preferred initial selection.
    pub default_directory: Option<String>,
    /// Prometheus exposition handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around a result source.
    pub fn new(source: Arc<dyn ResultSource>) -> Self {
        Self {
            source,
            chart_options: ChartOptions::default(),
            default_directory: None,
            metrics: None,
        }
    }

    /// Create state from the service configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let source = FsResultSource::new(&config.base_dir, config.generate_if_missing);
        Self {
            source: Arc::new(source),
            chart_options: config.chart_options(),
            default_directory: config.default_directory.clone(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// List result directories, logging and swallowing failures.
    pub fn directories(&self) -> Vec<String> {
        self.source.list_directories().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to list result directories");
            Vec::new()
        })
    }

    /// The directory to select initially: the configured one when it
    /// exists, else the first listed.
    pub fn initial_selection<'a>(&'a self, directories: &'a [String]) -> Option<&'a str> {
        self.default_directory
            .as_deref()
            .filter(|preferred| directories.iter().any(|d| d == preferred))
            .or_else(|| directories.first().map(String::as_str))
    }
}

/// Response of `GET /api/v1/directories`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoriesResponse {
    /// Result directory names, sorted.
    pub directories: Vec<String>,
    /// Initial selection.
    pub default: Option<String>,
}

/// Query of `GET /api/v1/charts`.
#[derive(Debug, Default, Deserialize)]
pub struct ChartsQuery {
    /// Selected result directory.
    #[serde(default)]
    pub directory: Option<String>,
}

/// Response of `GET /api/v1/charts`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartsResponse {
    /// Selected result directory, echoed back.
    pub directory: Option<String>,
    /// Time and residual charts.
    #[serde(flatten)]
    pub charts: ChartPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockResultSource;

    fn state_with_default(default: Option<&str>) -> AppState {
        let mut state = AppState::new(Arc::new(MockResultSource::new()));
        state.default_directory = default.map(str::to_string);
        state
    }

    #[test]
    fn test_initial_selection_prefers_configured_directory() {
        let dirs = vec!["CuDSS".to_string(), "DiffOpt".to_string()];
        let state = state_with_default(Some("DiffOpt"));
        assert_eq!(state.initial_selection(&dirs), Some("DiffOpt"));
    }

    #[test]
    fn test_initial_selection_falls_back_to_first() {
        let dirs = vec!["CuDSS".to_string(), "DiffOpt".to_string()];
        assert_eq!(state_with_default(Some("gone")).initial_selection(&dirs), Some("CuDSS"));
        assert_eq!(state_with_default(None).initial_selection(&dirs), Some("CuDSS"));
        assert_eq!(state_with_default(None).initial_selection(&[]), None);
    }
}
