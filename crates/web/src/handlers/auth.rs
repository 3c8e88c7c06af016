//! Handlers for `/auth` (sign-in page, sign-in, sign-out).
//!
//! Every failed sign-in looks the same to the user. The difference between
//! a wrong password and a system fault only shows up in the logs, which the
//! backend client writes for the latter.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use quickdeck_core::gate::CALLBACK_PARAM;
use serde::Deserialize;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::error::{AppError, AppResult};
use crate::redirect::see_other;
use crate::state::AppState;

/// Value of `?error=` after a failed sign-in.
pub const SIGN_IN_ERROR: &str = "CredentialsSignin";

/// The only failure message a user ever sees.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Wrong username or password.";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string of `GET /auth/signin`.
#[derive(Debug, Default, Deserialize)]
pub struct SignInQuery {
    pub error: Option<String>,
    pub callback_url: Option<String>,
}

/// Form body of `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub callback_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /auth/signin
pub async fn sign_in_page(Query(query): Query<SignInQuery>) -> Html<String> {
    Html(render_sign_in_page(&query))
}

/// POST /auth/signin
///
/// Exchange credentials with the backend, then store the identity in a
/// signed session cookie and continue to the requested page.
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    let callback = form.callback_url.as_deref().filter(|c| !c.is_empty());

    let identity = match state.backend.authenticate(&form.username, &form.password).await {
        Ok(identity) => identity,
        Err(_) => return Ok(sign_in_failed(&state, &headers, callback)),
    };

    let token = match state.sessions.encode(&identity) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, user_id = identity.id, "Could not issue a session");
            return Ok(sign_in_failed(&state, &headers, callback));
        }
    };

    let cookie = session_cookie(
        token.as_str(),
        state.sessions.max_age_secs(),
        state.config.session.cookie_secure,
    )
    .map_err(|e| AppError::InternalError(format!("Session cookie error: {e}")))?;

    tracing::info!(user_id = identity.id, username = %identity.username, "Signed in");

    let target = state.gate.post_sign_in_target(callback);
    Ok((
        [(SET_COOKIE, cookie)],
        see_other(&state.config, &headers, &target),
    )
        .into_response())
}

/// POST /auth/signout
///
/// Drop the session cookie and return to the sign-in page. There is no
/// server-side session to revoke.
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    (
        [(SET_COOKIE, clear_session_cookie())],
        see_other(&state.config, &headers, &state.gate.sign_in_path),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sign_in_failed(state: &AppState, headers: &HeaderMap, callback: Option<&str>) -> Response {
    let mut target = format!("{}?error={SIGN_IN_ERROR}", state.gate.sign_in_path);
    if let Some(callback) = callback {
        target.push_str(&format!("&{CALLBACK_PARAM}={}", urlencoding::encode(callback)));
    }
    see_other(&state.config, headers, &target).into_response()
}

fn render_sign_in_page(query: &SignInQuery) -> String {
    let error = if query.error.is_some() {
        format!(r#"<p class="error" role="alert">{SIGN_IN_FAILED_MESSAGE}</p>"#)
    } else {
        String::new()
    };
    let callback = query
        .callback_url
        .as_deref()
        .map(|c| {
            format!(
                r#"<input type="hidden" name="{CALLBACK_PARAM}" value="{}">"#,
                escape_html(c)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<h1>Sign in</h1>
{error}
<form method="post" action="/auth/signin">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
{callback}
<button type="submit">Sign in</button>
</form>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
