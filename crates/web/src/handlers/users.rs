//! GET /dashboard/users

use axum::extract::State;
use axum::Json;
use quickdeck_core::project::DirectoryUser;

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The backend user directory. The backend decides who may read it.
pub async fn list(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
) -> AppResult<Json<DataResponse<Vec<DirectoryUser>>>> {
    let users = state.backend.list_users(&identity.access_token).await?;
    Ok(Json(DataResponse { data: users }))
}
