// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Request metrics middleware for the dashboard.
//!
//! Counts every request and records its latency, labelled by the matched
//! route template (not the raw URI, so query strings and unknown paths do
//! not blow up label cardinality).

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::debug;

/// Label used for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Middleware recording `dashboard_http_requests_total` and
/// `dashboard_http_request_duration_seconds`.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let method = req.method().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();
    debug!(%route, %method, %status, elapsed, "Request completed");

    let labels = [("route", route), ("method", method), ("status", status)];
    metrics::counter!("dashboard_http_requests_total", &labels).increment(1);
    metrics::histogram!("dashboard_http_request_duration_seconds", &labels).record(elapsed);

    response
}
