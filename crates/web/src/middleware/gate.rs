//! The authorization gate, applied to every request.
//!
//! Mounted with `axum::middleware::from_fn_with_state` around the whole
//! router so no route can be reached without passing through it. The gate
//! decodes the session cookie, asks [`GatePolicy`](quickdeck_core::gate::GatePolicy)
//! what to do, and either forwards the request (with the [`Identity`] in its
//! extensions) or answers with a redirect. Handler responses marked
//! [`ReauthRequired`] get their sign-in Location resolved against the
//! public URL on the way out.

use axum::extract::{Request, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use quickdeck_core::identity::Identity;

use crate::auth::cookie::{clear_session_cookie, read_cookie, SESSION_COOKIE};
use crate::error::ReauthRequired;
use crate::redirect::{location_for, see_other};
use crate::state::AppState;

pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = read_cookie(request.headers(), SESSION_COOKIE);
    let identity: Option<Identity> = token.as_deref().and_then(|t| state.sessions.decode(t));

    let decision = state.gate.decide_request(
        request.uri().path(),
        request.uri().query(),
        identity.is_some(),
    );

    match decision.redirect_target() {
        None => {
            let sign_in = location_for(&state.config, request.headers(), &state.gate.sign_in_path);
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            let mut response = next.run(request).await;
            if response.extensions().get::<ReauthRequired>().is_some() {
                if let Ok(location) = HeaderValue::from_str(&sign_in) {
                    response.headers_mut().insert(LOCATION, location);
                }
            }
            response
        }
        Some(target) => {
            let redirect = see_other(&state.config, request.headers(), target);
            // A cookie that no longer decodes is dead weight; drop it.
            if token.is_some() && identity.is_none() {
                ([(SET_COOKIE, clear_session_cookie())], redirect).into_response()
            } else {
                redirect.into_response()
            }
        }
    }
}
