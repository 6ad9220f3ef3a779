// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Interactive benchmark results dashboard.
//!
//! Serves one page with a result directory dropdown and two chart panels,
//! plus the JSON endpoints the page drives them with.

#![deny(unsafe_code)]

pub mod config;
pub mod middleware;
pub mod models;
pub mod page;
pub mod routes;
pub mod selection;
pub mod source;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::{DashboardConfig, LogFormat};
pub use models::AppState;
pub use selection::charts_for_selection;
pub use source::{FsResultSource, ResultSource};

/// Build the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::directories::routes())
        .merge(routes::charts::routes())
        .merge(routes::health::routes())
        .layer(axum::middleware::from_fn(middleware::track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence over the
/// `info` default.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartsResponse, DirectoriesResponse};
    use crate::source::MockResultSource;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use bench_dashboard_core::{BenchmarkRecord, ResultSet};
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use tower::ServiceExt;

    fn test_app(source: MockResultSource) -> Router {
        app(Arc::new(AppState::new(Arc::new(source))))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn two_directories() -> MockResultSource {
        let mut source = MockResultSource::new();
        source
            .expect_list_directories()
            .returning(|| Ok(vec!["CuDSS".to_string(), "DiffOpt".to_string()]));
        source
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(test_app(MockResultSource::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_index_renders_dropdown() {
        let (status, body) = get(test_app(two_directories()), "/").await;
        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body).unwrap();
        assert!(page.contains("<option value=\"CuDSS\" selected>CuDSS</option>"));
        assert!(page.contains("<option value=\"DiffOpt\">DiffOpt</option>"));
    }

    #[tokio::test]
    async fn test_directories_endpoint() {
        let (status, body) = get(test_app(two_directories()), "/api/v1/directories").await;
        assert_eq!(status, StatusCode::OK);
        let response: DirectoriesResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.directories, vec!["CuDSS", "DiffOpt"]);
        assert_eq!(response.default.as_deref(), Some("CuDSS"));
    }

    #[tokio::test]
    async fn test_charts_endpoint_builds_selected_directory() {
        let mut source = MockResultSource::new();
        source.expect_load().with(eq("DiffOpt")).times(1).returning(|_| {
            Ok(ResultSet::new(vec![
                BenchmarkRecord::new("B", 16, 1.0, 0.1),
                BenchmarkRecord::new("A", 8, 0.5, 0.05),
                BenchmarkRecord::new("A", 16, 0.9, 0.09),
                BenchmarkRecord::new("B", 8, 0.4, 0.04),
            ]))
        });

        let (status, body) = get(test_app(source), "/api/v1/charts?directory=DiffOpt").await;
        assert_eq!(status, StatusCode::OK);

        let response: ChartsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.directory.as_deref(), Some("DiffOpt"));
        assert_eq!(response.charts.time.series_names(), vec!["A", "B"]);
        let b = response.charts.time.series("B").unwrap();
        assert_eq!(b.x, vec![8, 16]);
        assert_eq!(b.y, vec![0.4, 1.0]);
    }

    #[tokio::test]
    async fn test_charts_endpoint_without_selection_is_empty() {
        let mut source = MockResultSource::new();
        source.expect_load().never();

        let (status, body) = get(test_app(source), "/api/v1/charts").await;
        assert_eq!(status, StatusCode::OK);
        let response: ChartsResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.charts.is_empty());
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let (status, _) = get(test_app(MockResultSource::new()), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
