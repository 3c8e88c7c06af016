//! The authenticated user as seen by the console.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Authenticated user profile plus the backend bearer token.
///
/// Built once by the credential exchange and carried unchanged inside the
/// signed session for as long as the session lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub display_name: String,
    pub is_admin: bool,
    /// Opaque backend access token. Never serialized into API responses;
    /// use [`IdentitySummary`] for that.
    pub access_token: String,
}

/// Identity fields that are safe to return to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub display_name: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Pick the name shown for a user: the nickname when it has content,
/// otherwise the username.
pub fn display_name(nickname: Option<&str>, username: &str) -> String {
    match nickname.map(str::trim) {
        Some(nick) if !nick.is_empty() => nick.to_string(),
        _ => username.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_wins_when_present() {
        assert_eq!(display_name(Some("Ada"), "ada.l"), "Ada");
    }

    #[test]
    fn blank_nickname_falls_back_to_username() {
        assert_eq!(display_name(Some("   "), "ada.l"), "ada.l");
        assert_eq!(display_name(None, "ada.l"), "ada.l");
    }

    #[test]
    fn summary_omits_token() {
        let identity = Identity {
            id: 3,
            username: "ops".into(),
            email: None,
            display_name: "Ops".into(),
            is_admin: true,
            access_token: "secret-token".into(),
        };
        let json = serde_json::to_value(identity.summary()).unwrap();
        assert!(json.get("access_token").is_none());
        assert_eq!(json["is_admin"], true);
    }
}
