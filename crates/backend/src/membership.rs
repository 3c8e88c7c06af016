//! Project membership calls and application of a [`MembershipPlan`].
//!
//! The backend exposes a bulk add and a single-user remove, so applying a
//! plan costs at most one add call plus one call per removed user. Each call
//! succeeds or fails on its own; a failed removal never stops the rest.

use quickdeck_core::membership::MembershipPlan;
use quickdeck_core::project::DirectoryUser;
use quickdeck_core::types::DbId;
use serde::Serialize;

use crate::client::BackendClient;
use crate::error::BackendError;

#[derive(Serialize)]
struct AddUsersRequest<'a> {
    user_ids: &'a [DbId],
}

/// Which membership call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipOp {
    Add,
    Remove,
}

/// One failed membership call.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipFailure {
    pub op: MembershipOp,
    pub user_ids: Vec<DbId>,
    /// HTTP status from the backend, if it answered.
    pub status: Option<u16>,
    pub message: String,
}

/// What happened when a plan was applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MembershipOutcome {
    pub added: Vec<DbId>,
    pub removed: Vec<DbId>,
    pub failures: Vec<MembershipFailure>,
}

impl MembershipOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether any call failed because the backend rejected the token.
    pub fn requires_reauth(&self) -> bool {
        self.failures.iter().any(|f| f.status == Some(401))
    }

    /// Whether any call went through.
    pub fn changed_anything(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

impl BackendClient {
    /// `GET /api/projects/{id}/users`
    pub async fn list_project_users(
        &self,
        token: &str,
        project_id: DbId,
    ) -> Result<Vec<DirectoryUser>, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/api/projects/{project_id}/users")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/projects/{id}/users` with `{ "user_ids": [...] }`.
    pub async fn add_project_users(
        &self,
        token: &str,
        project_id: DbId,
        user_ids: &[DbId],
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(&format!("/api/projects/{project_id}/users")))
            .bearer_auth(token)
            .json(&AddUsersRequest { user_ids })
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// `DELETE /api/projects/{id}/users/{user_id}`
    pub async fn remove_project_user(
        &self,
        token: &str,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/projects/{project_id}/users/{user_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Issue the calls described by `plan`, sequentially.
    ///
    /// The plan is taken as computed; it is not re-derived between calls.
    pub async fn apply_membership_plan(
        &self,
        token: &str,
        project_id: DbId,
        plan: &MembershipPlan,
    ) -> MembershipOutcome {
        let mut outcome = MembershipOutcome::default();

        if !plan.to_add.is_empty() {
            let ids: Vec<DbId> = plan.to_add.iter().copied().collect();
            match self.add_project_users(token, project_id, &ids).await {
                Ok(()) => outcome.added = ids,
                Err(e) => {
                    tracing::warn!(project_id, user_ids = ?ids, error = %e, "Adding project members failed");
                    outcome.failures.push(MembershipFailure {
                        op: MembershipOp::Add,
                        status: e.status(),
                        message: e.detail().unwrap_or_else(|| e.to_string()),
                        user_ids: ids,
                    });
                }
            }
        }

        for &user_id in &plan.to_remove {
            match self.remove_project_user(token, project_id, user_id).await {
                Ok(()) => outcome.removed.push(user_id),
                Err(e) => {
                    tracing::warn!(project_id, user_id, error = %e, "Removing project member failed");
                    outcome.failures.push(MembershipFailure {
                        op: MembershipOp::Remove,
                        user_ids: vec![user_id],
                        status: e.status(),
                        message: e.detail().unwrap_or_else(|| e.to_string()),
                    });
                }
            }
        }

        outcome
    }
}
