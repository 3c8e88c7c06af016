use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use quickdeck_backend::BackendError;
use quickdeck_core::error::CoreError;
use quickdeck_core::gate::SIGN_IN_PATH;
use serde_json::json;

use crate::auth::cookie::clear_session_cookie;
use crate::auth::session::SessionError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`BackendError`] for failed
/// backend calls. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `quickdeck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backend REST call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A session could not be issued.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Marks a response that sends the user back to sign in because the backend
/// rejected their token.
#[derive(Debug, Clone, Copy)]
pub struct ReauthRequired;

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The backend no longer accepts the session's token: drop the
        // session and send the user back to sign in, without an error page.
        // The relative Location is rewritten against the public URL by the
        // session gate, which sees the request headers.
        if matches!(&self, AppError::Backend(e) if e.is_unauthorized()) {
            let mut response = (
                [(SET_COOKIE, clear_session_cookie())],
                Redirect::to(SIGN_IN_PATH),
            )
                .into_response();
            response.extensions_mut().insert(ReauthRequired);
            return response;
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(err),

            // --- Session errors ---
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - 403 and 404 pass through with the backend's `detail` when present.
/// - Other 4xx become 400 with the backend's `detail`.
/// - 5xx and transport failures become 502 with a sanitized message.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Forbidden(_) => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            err.detail()
                .unwrap_or_else(|| "Not allowed for this account".to_string()),
        ),
        BackendError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            err.detail()
                .unwrap_or_else(|| "Resource not found".to_string()),
        ),
        BackendError::Api { status, .. } if (400..500).contains(status) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            err.detail()
                .unwrap_or_else(|| "The backend rejected the request".to_string()),
        ),
        other => {
            tracing::error!(error = %other, "Backend call failed");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                "The backend is unavailable".to_string(),
            )
        }
    }
}
