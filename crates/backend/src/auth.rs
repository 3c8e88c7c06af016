//! Credential exchange against the backend token endpoint.
//!
//! [`BackendClient::authenticate`] performs exactly two sequential calls:
//! `POST /api/auth/login` for a token, then `GET /api/auth/me` for the
//! profile behind it. There are no retries; the caller owns retry policy.
//!
//! A rejected password is an expected outcome and is never logged. Backend
//! faults are logged with enough detail to diagnose them, but the failure
//! kinds themselves carry nothing the end user should see.

use quickdeck_core::identity::{display_name, Identity};
use quickdeck_core::types::DbId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::BackendClient;

/// Why a sign-in attempt did not produce an [`Identity`].
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    /// Username or password was empty; no request was made.
    #[error("Username and password are required")]
    MissingCredentials,

    /// The backend answered 401 to the login call.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The login call failed for any other reason.
    #[error("Login endpoint failed (status {status:?}): {body}")]
    BackendError {
        /// HTTP status, or `None` when the request never got a response.
        status: Option<u16>,
        body: String,
    },

    /// The login call succeeded but returned no usable `access_token`.
    #[error("Login response did not contain an access token")]
    MalformedResponse,

    /// The token was issued but the profile behind it could not be loaded.
    #[error("Could not fetch the authenticated user: {0}")]
    IdentityFetchFailed(String),
}

impl AuthFailure {
    /// `true` for outcomes caused by user input rather than a system fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AuthFailure::MissingCredentials | AuthFailure::InvalidCredentials
        )
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Body of `GET /api/auth/me`. Fields are optional so that a partial body
/// is reported as [`AuthFailure::IdentityFetchFailed`] instead of a decode error.
#[derive(Deserialize)]
struct CurrentUser {
    id: Option<DbId>,
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

impl BackendClient {
    /// Exchange a username and password for an authenticated [`Identity`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthFailure> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthFailure::MissingCredentials);
        }

        let access_token = self.login(username, password).await?;
        let profile = self.current_user(&access_token).await?;

        let (id, username) = match (profile.id, profile.username) {
            (Some(id), Some(username)) if !username.is_empty() => (id, username),
            _ => {
                tracing::warn!("Current-user response is missing id or username");
                return Err(AuthFailure::IdentityFetchFailed(
                    "response missing id or username".into(),
                ));
            }
        };

        Ok(Identity {
            id,
            display_name: display_name(profile.nickname.as_deref(), &username),
            username,
            email: profile.email.filter(|e| !e.is_empty()),
            is_admin: profile.is_admin,
            access_token,
        })
    }

    /// `POST /api/auth/login`, returning the access token.
    async fn login(&self, username: &str, password: &str) -> Result<String, AuthFailure> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Login request could not reach the backend");
                AuthFailure::BackendError {
                    status: None,
                    body: e.to_string(),
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthFailure::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "Login endpoint returned an error");
            return Err(AuthFailure::BackendError {
                status: Some(status.as_u16()),
                body,
            });
        }

        let token = response
            .json::<LoginResponse>()
            .await
            .ok()
            .and_then(|r| r.access_token)
            .filter(|t| !t.is_empty());

        token.ok_or_else(|| {
            tracing::warn!("Login response did not contain an access token");
            AuthFailure::MalformedResponse
        })
    }

    /// `GET /api/auth/me` with the freshly issued token.
    async fn current_user(&self, access_token: &str) -> Result<CurrentUser, AuthFailure> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Current-user request failed");
                AuthFailure::IdentityFetchFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Current-user endpoint returned an error");
            return Err(AuthFailure::IdentityFetchFailed(format!("status {status}")));
        }

        response.json::<CurrentUser>().await.map_err(|e| {
            tracing::warn!(error = %e, "Current-user response could not be decoded");
            AuthFailure::IdentityFetchFailed(e.to_string())
        })
    }
}
