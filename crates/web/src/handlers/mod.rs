pub mod auth;
pub mod dashboard;
pub mod members;
pub mod projects;
pub mod users;

use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

/// Fallback for unknown paths outside the gated area.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "code": "NOT_FOUND" })),
    )
}
