use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether sessions can be issued. False when no signing secret is set.
    pub session_signing: bool,
}

/// GET /health -- the console is up; reports `degraded` when sign-in
/// cannot work because sessions are disabled.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_signing = state.sessions.is_enabled();
    let status = if session_signing { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        session_signing,
    })
}

/// Mount health check routes. The gate lets `/health` through unconditionally.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
