//! Route definitions for the protected `/dashboard` area.
//!
//! Paths are spelled out in full rather than nested so that `/dashboard`
//! itself and its children resolve without trailing-slash ambiguity.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dashboard, members, projects, users};
use crate::state::AppState;

/// ```text
/// GET    /dashboard                          -> dashboard::overview
/// GET    /dashboard/projects                 -> projects::list
/// POST   /dashboard/projects                 -> projects::create
/// GET    /dashboard/projects/{id}            -> projects::get_by_id
/// PUT    /dashboard/projects/{id}            -> projects::update
/// DELETE /dashboard/projects/{id}            -> projects::delete
/// GET    /dashboard/projects/{id}/members    -> members::list
/// PUT    /dashboard/projects/{id}/members    -> members::update
/// GET    /dashboard/users                    -> users::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::overview))
        .route(
            "/dashboard/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/dashboard/projects/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/dashboard/projects/{id}/members",
            get(members::list).put(members::update),
        )
        .route("/dashboard/users", get(users::list))
}
