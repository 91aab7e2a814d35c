//! HTTP request handlers

use super::types::HealthResponse;
use super::AppState;
use axum::{extract::State, routing::get, Json, Router};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}

async fn root() -> &'static str {
    "Bot is running"
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len().await,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
