pub mod auth;
pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the console route tree.
///
/// ```text
/// /auth/signin                              sign-in form (GET), submit (POST)
/// /auth/signout                             sign out (POST)
///
/// /dashboard                                current identity
/// /dashboard/projects                       list, create
/// /dashboard/projects/{id}                  get, update, delete
/// /dashboard/projects/{id}/members          list, replace selection
/// /dashboard/users                          user directory
/// ```
///
/// Everything under `/dashboard` sits behind the session gate.
pub fn console_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
}
