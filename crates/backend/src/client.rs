//! Shared HTTP plumbing for the backend REST API.

use reqwest::StatusCode;

use crate::error::BackendError;

/// HTTP client for one QuickDeck backend.
///
/// Cheap to clone; the inner [`reqwest::Client`] pools connections.
#[derive(Clone)]
pub struct BackendClient {
    pub(crate) client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`, e.g. `http://host:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/projects`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- response helpers ----

    /// Map a non-2xx response onto [`BackendError`], passing 2xx through.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(match status {
            StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
            StatusCode::FORBIDDEN => BackendError::Forbidden(body),
            StatusCode::NOT_FOUND => BackendError::NotFound(body),
            _ => BackendError::Api {
                status: status.as_u16(),
                body,
            },
        })
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Check the status and discard the body.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
