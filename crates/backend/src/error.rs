use serde::Deserialize;

/// Errors from backend REST calls made on behalf of a signed-in user.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the bearer token (HTTP 401).
    #[error("Backend rejected the access token")]
    Unauthorized,

    /// The backend refused the operation for this user (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// HTTP 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx status.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl BackendError {
    /// HTTP status reported by the backend, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Request(e) => e.status().map(|s| s.as_u16()),
            BackendError::Unauthorized => Some(401),
            BackendError::Forbidden(_) => Some(403),
            BackendError::NotFound(_) => Some(404),
            BackendError::Api { status, .. } => Some(*status),
        }
    }

    /// The human-readable `detail` string from a backend error body, when
    /// the backend supplied one.
    pub fn detail(&self) -> Option<String> {
        let body = match self {
            BackendError::Forbidden(body) | BackendError::NotFound(body) => body,
            BackendError::Api { body, .. } => body,
            _ => return None,
        };
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_extracted_from_json_body() {
        let err = BackendError::Api {
            status: 400,
            body: r#"{"detail":"project id already exists"}"#.into(),
        };
        assert_eq!(err.detail().as_deref(), Some("project id already exists"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn structured_detail_is_not_surfaced() {
        let err = BackendError::Api {
            status: 422,
            body: r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#.into(),
        };
        assert!(err.detail().is_none());
    }

    #[test]
    fn non_json_body_has_no_detail() {
        let err = BackendError::NotFound("<html>nope</html>".into());
        assert!(err.detail().is_none());
        assert_eq!(err.status(), Some(404));
    }
}
