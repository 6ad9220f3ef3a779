use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use crate::models::{AppState, ChartsQuery, ChartsResponse};
use crate::selection::charts_for_selection;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/v1/charts", get(get_charts))
}

async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartsQuery>,
) -> Json<ChartsResponse> {
    metrics::counter!("dashboard_chart_requests_total").increment(1);
    info!(directory = ?query.directory, "Chart recompute requested");

    let charts = charts_for_selection(
        state.source.as_ref(),
        query.directory.as_deref(),
        &state.chart_options,
    );

    Json(ChartsResponse {
        directory: query.directory,
        charts,
    })
}
