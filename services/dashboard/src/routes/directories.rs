use axum::{extract::State, response::Html, routing::get, Json, Router};
use std::sync::Arc;

use crate::models::{AppState, DirectoriesResponse};
use crate::page::interactive_page;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/directories", get(list_directories))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let directories = state.directories();
    let selected = state.initial_selection(&directories);
    Html(interactive_page(&directories, selected))
}

async fn list_directories(State(state): State<Arc<AppState>>) -> Json<DirectoriesResponse> {
    let directories = state.directories();
    let default = state.initial_selection(&directories).map(str::to_string);
    Json(DirectoriesResponse {
        directories,
        default,
    })
}
