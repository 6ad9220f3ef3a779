// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Service configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. an optional `dashboard.toml` in the working directory
//! 3. `DASHBOARD_*` environment variables (a `.env` file is loaded first)
//!
//! `DASHBOARD_TICK_VALUES` takes a comma separated list.

use bench_dashboard_charts::{ChartOptions, TickPolicy};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Dashboard service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Directory holding one subdirectory per result set.
    pub base_dir: PathBuf,
    /// Build a missing aggregate from the run files.
    pub generate_if_missing: bool,
    /// Result directory selected when the page opens.
    #[serde(default)]
    pub default_directory: Option<String>,
    /// Fixed x-axis ticks; data-driven when unset.
    #[serde(default)]
    pub tick_values: Option<Vec<u64>>,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

impl DashboardConfig {
    /// Config builder preloaded with the defaults.
    pub fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8050)?
            .set_default("base_dir", "benchmark")?
            .set_default("generate_if_missing", true)?
            .set_default("log_format", "pretty")
    }

    /// Load configuration from defaults, `dashboard.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::defaults()?
            .add_source(File::with_name("dashboard").required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// `DASHBOARD_<KEY>` variables, e.g. `DASHBOARD_BASE_DIR`.
    fn environment() -> Environment {
        Environment::with_prefix("DASHBOARD")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("tick_values")
            .try_parsing(true)
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Chart options derived from the configuration.
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            tick_policy: TickPolicy::from_config(self.tick_values.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    #[test]
    fn test_defaults() {
        let config: DashboardConfig = DashboardConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8050");
        assert_eq!(config.base_dir, PathBuf::from("benchmark"));
        assert!(config.generate_if_missing);
        assert_eq!(config.default_directory, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.chart_options().tick_policy, TickPolicy::DataDriven);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            port = 9000
            base_dir = "/data/bench"
            generate_if_missing = false
            default_directory = "DiffOpt"
            tick_values = [8, 16, 32, 64, 128, 256, 1024]
            log_format = "json"
        "#;
        let config: DashboardConfig = DashboardConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert!(!config.generate_if_missing);
        assert_eq!(config.default_directory.as_deref(), Some("DiffOpt"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.chart_options().tick_policy,
            TickPolicy::Fixed(vec![8, 16, 32, 64, 128, 256, 1024])
        );
    }

    #[test]
    fn test_environment_overrides_use_single_underscore_prefix() {
        let vars: Map<String, String> = [
            ("DASHBOARD_BASE_DIR", "/srv/results"),
            ("DASHBOARD_PORT", "9100"),
            ("DASHBOARD_TICK_VALUES", "8,64,512"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: DashboardConfig = DashboardConfig::defaults()
            .unwrap()
            .add_source(DashboardConfig::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/srv/results"));
        assert_eq!(config.port, 9100);
        assert_eq!(
            config.chart_options().tick_policy,
            TickPolicy::Fixed(vec![8, 64, 512])
        );
    }
}
