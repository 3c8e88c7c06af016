//! User directory.

use quickdeck_core::project::DirectoryUser;

use crate::client::BackendClient;
use crate::error::BackendError;

impl BackendClient {
    /// `GET /api/users` -- every user the binding screen can choose from.
    pub async fn list_users(&self, token: &str) -> Result<Vec<DirectoryUser>, BackendError> {
        let response = self
            .client
            .get(self.url("/api/users"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
