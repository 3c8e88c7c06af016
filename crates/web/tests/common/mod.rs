//! Shared helpers for the console integration tests.
//!
//! The app under test is built with the same [`build_app_router`] the binary
//! uses; the REST backend is an in-process axum router on an ephemeral port.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quickdeck_core::identity::Identity;
use quickdeck_web::auth::cookie::SESSION_COOKIE;
use quickdeck_web::auth::session::SessionConfig;
use quickdeck_web::config::ServerConfig;
use quickdeck_web::router::build_app_router;
use quickdeck_web::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Nothing listens on the discard port, so any backend call fails fast.
pub const NO_BACKEND: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` pointing at `backend_url`.
pub fn test_config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        backend_url: backend_url.to_string(),
        public_url: None,
        session: SessionConfig {
            secret: Some(TEST_SECRET.to_string()),
            max_age_mins: 60,
            cookie_secure: false,
        },
    }
}

/// Build the full application router plus a handle on its state, so tests
/// can mint cookies and subscribe to the event bus.
pub fn build_test_app(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::from_config(config.clone());
    (build_app_router(state.clone(), &config), state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });
    format!("http://{addr}")
}

pub fn identity() -> Identity {
    Identity {
        id: 9,
        username: "alice".to_string(),
        email: Some("alice@example.com".to_string()),
        display_name: "Alice".to_string(),
        is_admin: true,
        access_token: "tok-alice".to_string(),
    }
}

/// `Cookie` header value carrying a valid session for `identity`.
pub fn session_cookie_for(state: &AppState, identity: &Identity) -> String {
    let token = state.sessions.encode(identity).expect("encode session");
    format!("{SESSION_COOKIE}={}", token.as_str())
}

/// Send a request with an optional `Cookie` header and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, cookie, None).await
}

/// Send a POST request with a url-encoded form body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap())
}

/// Log lines emitted by the console crates while the guard is alive.
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

struct CapturedWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    /// Install a thread-local subscriber recording `quickdeck_web` and
    /// `quickdeck_backend` events. Request tracing from `tower_http` is
    /// left out.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let sink = std::sync::Arc::clone(&logs.0);
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(
                "quickdeck_web=trace,quickdeck_backend=trace",
            ))
            .with_ansi(false)
            .with_writer(move || CapturedWriter(std::sync::Arc::clone(&sink)))
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let raw = self.0.lock().unwrap();
        String::from_utf8_lossy(&raw)
            .lines()
            .map(str::to_string)
            .collect()
    }
}
