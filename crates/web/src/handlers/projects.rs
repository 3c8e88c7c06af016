//! Handlers for `/dashboard/projects`.
//!
//! Thin pass-through to the backend with local form validation. Every
//! successful mutation publishes a [`ConsoleEvent`] and reports
//! `changed: true` so the caller knows to re-fetch its list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quickdeck_core::project::{Project, ProjectForm, UpdateProjectForm};
use quickdeck_core::types::DbId;
use quickdeck_events::{ChangeKind, ConsoleEvent};

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

/// GET /dashboard/projects
pub async fn list(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = state.backend.list_projects(&identity.access_token).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /dashboard/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state.backend.get_project(&identity.access_token, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /dashboard/projects
pub async fn create(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Json(input): Json<ProjectForm>,
) -> AppResult<(StatusCode, Json<MutationResponse<Project>>)> {
    let form = input.normalized()?;
    let project = state
        .backend
        .create_project(&identity.access_token, &form)
        .await?;

    state
        .event_bus
        .publish(ConsoleEvent::new(ChangeKind::ProjectCreated, project.id, identity.id));

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            data: project,
            changed: true,
        }),
    ))
}

/// PUT /dashboard/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectForm>,
) -> AppResult<Json<MutationResponse<Project>>> {
    let form = input.normalized()?;
    let project = state
        .backend
        .update_project(&identity.access_token, id, &form)
        .await?;

    state
        .event_bus
        .publish(ConsoleEvent::new(ChangeKind::ProjectUpdated, id, identity.id));

    Ok(Json(MutationResponse {
        data: project,
        changed: true,
    }))
}

/// DELETE /dashboard/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state
        .backend
        .delete_project(&identity.access_token, id)
        .await?;

    state
        .event_bus
        .publish(ConsoleEvent::new(ChangeKind::ProjectDeleted, id, identity.id));

    Ok(StatusCode::NO_CONTENT)
}
