// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark dashboard service entry point.

use anyhow::Context;
use dashboard_web::{app, init_tracing, AppState, DashboardConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::load().context("failed to load configuration")?;
    init_tracing(config.log_format);

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    if !config.base_dir.is_dir() {
        warn!(
            base_dir = %config.base_dir.display(),
            "Benchmark base directory does not exist; the selector will be empty"
        );
    }

    let state = AppState::from_config(&config).with_metrics(metrics);
    let router = app(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        %addr,
        base_dir = %config.base_dir.display(),
        generate_if_missing = config.generate_if_missing,
        "Benchmark dashboard listening"
    );

    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
