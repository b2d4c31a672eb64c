//! Route table. All intelligence endpoints live under `/api/intelligence`.

pub mod intelligence;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(intelligence::index))
        .route("/api/intelligence/analyze", post(intelligence::analyze))
        .route("/api/intelligence/runs", get(intelligence::list_runs))
        .route("/api/intelligence/runs/{id}", get(intelligence::get_run))
        .route(
            "/api/intelligence/runs/{id}/feedback",
            post(intelligence::post_feedback),
        )
        .route("/api/intelligence/health", get(intelligence::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
