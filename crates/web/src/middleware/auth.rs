//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quickdeck_core::error::CoreError;
use quickdeck_core::identity::Identity;

use crate::auth::cookie::{read_cookie, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user behind the current request.
///
/// The gate middleware has normally decoded the session already and left
/// the [`Identity`] in the request extensions; otherwise the cookie is
/// decoded here.
///
/// ```ignore
/// async fn my_handler(SessionUser(identity): SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = identity.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser(pub Identity);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(SessionUser(identity.clone()));
        }

        read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|token| state.sessions.decode(&token))
            .map(SessionUser)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not signed in".into())))
    }
}
