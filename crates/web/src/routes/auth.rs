//! Route definitions for the `/auth` pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Sign-in and sign-out.
///
/// ```text
/// GET  /auth/signin   -> sign_in_page
/// POST /auth/signin   -> sign_in
/// POST /auth/signout  -> sign_out
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", get(auth::sign_in_page).post(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
}
