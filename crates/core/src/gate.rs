//! Route-level authorization policy.
//!
//! [`GatePolicy::decide`] is evaluated for every inbound request before any
//! page logic runs. It is a routing decision, not an error path: a missing
//! session is a normal case that simply yields a redirect.

/// Root of the protected dashboard area.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Path of the sign-in page.
pub const SIGN_IN_PATH: &str = "/auth/signin";
/// Query parameter carrying the page the user originally asked for.
pub const CALLBACK_PARAM: &str = "callback_url";

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through to its handler.
    Allow,
    /// Protected path without a session: send the user to sign in.
    Deny { redirect: String },
    /// Root path: forward to the dashboard or the sign-in page.
    Redirect(String),
}

impl GateDecision {
    /// Relative redirect target, if the request must not proceed.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::Deny { redirect } | GateDecision::Redirect(redirect) => Some(redirect),
        }
    }
}

/// Paths that drive the gate.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    pub protected_prefix: String,
    pub sign_in_path: String,
    pub dashboard_path: String,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            protected_prefix: DASHBOARD_PATH.to_string(),
            sign_in_path: SIGN_IN_PATH.to_string(),
            dashboard_path: DASHBOARD_PATH.to_string(),
        }
    }
}

impl GatePolicy {
    /// Decide what happens to a request for `path`.
    pub fn decide(&self, path: &str, has_session: bool) -> GateDecision {
        self.decide_request(path, None, has_session)
    }

    /// Like [`decide`](Self::decide), keeping the query string in the
    /// callback of a Deny so the user returns to the exact page.
    pub fn decide_request(
        &self,
        path: &str,
        query: Option<&str>,
        has_session: bool,
    ) -> GateDecision {
        if self.is_protected(path) {
            if has_session {
                GateDecision::Allow
            } else {
                let callback = match query.filter(|q| !q.is_empty()) {
                    Some(query) => format!("{path}?{query}"),
                    None => path.to_string(),
                };
                GateDecision::Deny {
                    redirect: self.sign_in_redirect(Some(&callback)),
                }
            }
        } else if path.is_empty() || path == "/" {
            if has_session {
                GateDecision::Redirect(self.dashboard_path.clone())
            } else {
                GateDecision::Redirect(self.sign_in_path.clone())
            }
        } else {
            GateDecision::Allow
        }
    }

    /// Whether `path` is the protected prefix itself or lies beneath it.
    pub fn is_protected(&self, path: &str) -> bool {
        match path.strip_prefix(self.protected_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Sign-in path, optionally remembering where the user was headed.
    pub fn sign_in_redirect(&self, callback: Option<&str>) -> String {
        match callback {
            Some(target) if is_local_path(target) => format!(
                "{}?{CALLBACK_PARAM}={}",
                self.sign_in_path,
                urlencoding::encode(target)
            ),
            _ => self.sign_in_path.clone(),
        }
    }

    /// Where to send a user after a successful sign-in. Only local paths are
    /// honoured; anything else lands on the dashboard root.
    pub fn post_sign_in_target(&self, callback: Option<&str>) -> String {
        match callback {
            Some(target) if is_local_path(target) => target.to_string(),
            _ => self.dashboard_path.clone(),
        }
    }
}

/// A same-origin absolute path: starts with `/` but not `//` or `/\`.
fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}
