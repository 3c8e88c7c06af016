//! Handlers for `/dashboard/projects/{id}/members`.
//!
//! The owner is implied: it is reported separately and stripped from the
//! selection before reconciling, so it can never be removed.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::Json;
use quickdeck_backend::{BackendError, MembershipOutcome};
use quickdeck_core::membership::{members_excluding_owner, reconcile, MembershipPlan};
use quickdeck_core::project::DirectoryUser;
use quickdeck_core::types::DbId;
use quickdeck_events::{ChangeKind, ConsoleEvent};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::response::{DataResponse, MutationResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Current membership of a project.
#[derive(Debug, Serialize)]
pub struct ProjectMembers {
    pub project_id: DbId,
    pub owner_id: DbId,
    /// Members other than the owner.
    pub members: Vec<DirectoryUser>,
}

/// Body of `PUT /dashboard/projects/{id}/members`: the full new selection.
#[derive(Debug, Deserialize)]
pub struct UpdateMembers {
    pub user_ids: Vec<DbId>,
}

/// What the update did.
#[derive(Debug, Serialize)]
pub struct MembershipReport {
    pub plan: MembershipPlan,
    pub outcome: MembershipOutcome,
    pub complete: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /dashboard/projects/{id}/members
pub async fn list(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectMembers>>> {
    let token = &identity.access_token;
    let project = state.backend.get_project(token, project_id).await?;
    let members = state.backend.list_project_users(token, project_id).await?;

    Ok(Json(DataResponse {
        data: ProjectMembers {
            project_id,
            owner_id: project.owner_id,
            members: members
                .into_iter()
                .filter(|u| u.id != project.owner_id)
                .collect(),
        },
    }))
}

/// PUT /dashboard/projects/{id}/members
///
/// Reconcile the submitted selection against the live membership and apply
/// the difference. Individual call failures are reported in the outcome,
/// not as an error response.
pub async fn update(
    State(state): State<AppState>,
    SessionUser(identity): SessionUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateMembers>,
) -> AppResult<Json<MutationResponse<MembershipReport>>> {
    let token = &identity.access_token;
    let project = state.backend.get_project(token, project_id).await?;
    let members = state.backend.list_project_users(token, project_id).await?;

    let current = members_excluding_owner(&members, project.owner_id);
    let selected: BTreeSet<DbId> = input
        .user_ids
        .into_iter()
        .filter(|&id| id != project.owner_id)
        .collect();

    let plan = reconcile(&current, &selected, project.owner_id);
    let outcome = state
        .backend
        .apply_membership_plan(token, project_id, &plan)
        .await;

    // Steps that went through before the token was rejected still count.
    let changed = outcome.changed_anything();
    if changed {
        state
            .event_bus
            .publish(ConsoleEvent::new(ChangeKind::MembersChanged, project_id, identity.id));
    }

    if outcome.requires_reauth() {
        return Err(AppError::Backend(BackendError::Unauthorized));
    }

    Ok(Json(MutationResponse {
        data: MembershipReport {
            complete: outcome.is_complete(),
            plan,
            outcome,
        },
        changed,
    }))
}
