//! Project CRUD against `/api/projects`.

use quickdeck_core::project::{Project, ProjectForm, UpdateProjectForm};
use quickdeck_core::types::DbId;

use crate::client::BackendClient;
use crate::error::BackendError;

impl BackendClient {
    /// `GET /api/projects` -- projects visible to the token's user.
    pub async fn list_projects(&self, token: &str) -> Result<Vec<Project>, BackendError> {
        let response = self
            .client
            .get(self.url("/api/projects"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/projects/{id}`
    pub async fn get_project(&self, token: &str, id: DbId) -> Result<Project, BackendError> {
        let response = self
            .client
            .get(self.url(&format!("/api/projects/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/projects`. The form must already be normalized.
    pub async fn create_project(
        &self,
        token: &str,
        form: &ProjectForm,
    ) -> Result<Project, BackendError> {
        let response = self
            .client
            .post(self.url("/api/projects"))
            .bearer_auth(token)
            .json(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /api/projects/{id}` with only the fields being changed.
    pub async fn update_project(
        &self,
        token: &str,
        id: DbId,
        form: &UpdateProjectForm,
    ) -> Result<Project, BackendError> {
        let response = self
            .client
            .put(self.url(&format!("/api/projects/{id}")))
            .bearer_auth(token)
            .json(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /api/projects/{id}`
    pub async fn delete_project(&self, token: &str, id: DbId) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/projects/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await
    }
}
