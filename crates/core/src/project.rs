//! Project and user-directory records plus local form validation.
//!
//! Records mirror the backend JSON contract. Forms are validated here so an
//! invalid name or description never costs a network round trip.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum project name length, in characters.
pub const PROJECT_NAME_MAX_CHARS: usize = 50;
/// Maximum project description length, in characters.
pub const PROJECT_DESCRIPTION_MAX_CHARS: usize = 200;

/// A project as returned by `GET /api/projects[/{id}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    /// Stable string key assigned by the backend (UUID when not supplied).
    #[serde(default)]
    pub project_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: DbId,
    #[serde(deserialize_with = "crate::types::deserialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, deserialize_with = "crate::types::deserialize_optional_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// A user in the backend directory, or a member of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: DbId,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
}

impl ProjectForm {
    /// Trim the fields, drop an empty description, and validate lengths.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let form = Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };
        form.validate()?;
        Ok(form)
    }
}

/// Partial input for editing a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
}

impl UpdateProjectForm {
    /// Trim the fields and validate lengths. An empty description is kept
    /// so the user can clear it.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let form = Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
        };
        if form.name.is_none() && form.description.is_none() {
            return Err(CoreError::Validation("nothing to update".into()));
        }
        form.validate()?;
        Ok(form)
    }
}
