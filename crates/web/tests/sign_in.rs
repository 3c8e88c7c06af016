//! Sign-in and sign-out through the console, against a stub backend.

mod common;

use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{
    body_json, body_text, build_test_app, get as get_page, location, post_form, send, set_cookie,
    spawn_backend, test_config, CapturedLogs, NO_BACKEND,
};
use quickdeck_web::auth::cookie::SESSION_COOKIE;
use serde_json::{json, Value};

/// Stub backend with one account, `ada` / `s3cret`.
async fn auth_backend() -> String {
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["username"] == "ada" && body["password"] == "s3cret" {
                    Json(json!({ "access_token": "tok-ada", "token_type": "bearer" }))
                        .into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "bad credentials" })))
                        .into_response()
                }
            }),
        )
        .route(
            "/api/auth/me",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer tok-ada") => Json(json!({
                        "id": 7,
                        "username": "ada",
                        "email": "ada@example.com",
                        "nickname": "Ada L.",
                        "is_admin": false
                    }))
                    .into_response(),
                    _ => StatusCode::UNAUTHORIZED.into_response(),
                }
            }),
        );
    spawn_backend(router).await
}

/// Stub backend whose login endpoint is broken.
async fn broken_backend() -> String {
    let router = Router::new().route(
        "/api/auth/login",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is down") }),
    );
    spawn_backend(router).await
}

fn session_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Test: successful sign-in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_credentials_set_session_and_go_to_dashboard() {
    let (app, _) = build_test_app(test_config(&auth_backend().await));

    let response = post_form(app.clone(), "/auth/signin", "username=ada&password=s3cret").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = set_cookie(&response).expect("session cookie");
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));
    assert!(!cookie.contains("Secure"));

    // The new session opens the dashboard.
    let pair = session_pair(cookie);
    let response = get_page(app, "/dashboard", Some(&pair)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 7);
    assert_eq!(json["data"]["display_name"], "Ada L.");
}

#[tokio::test]
async fn sign_in_returns_to_callback() {
    let (app, _) = build_test_app(test_config(&auth_backend().await));

    let response = post_form(
        app,
        "/auth/signin",
        "username=ada&password=s3cret&callback_url=%2Fdashboard%2Fprojects%2F3",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard/projects/3");
}

#[tokio::test]
async fn off_site_callback_is_ignored() {
    let (app, _) = build_test_app(test_config(&auth_backend().await));

    let response = post_form(
        app,
        "/auth/signin",
        "username=ada&password=s3cret&callback_url=https%3A%2F%2Fevil.example",
    )
    .await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn secure_flag_follows_config() {
    let mut config = test_config(&auth_backend().await);
    config.session.cookie_secure = true;
    let (app, _) = build_test_app(config);

    let response = post_form(app, "/auth/signin", "username=ada&password=s3cret").await;
    assert!(set_cookie(&response).unwrap().ends_with("; Secure"));
}

// ---------------------------------------------------------------------------
// Test: failed sign-in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_password_redirects_with_generic_error_and_logs_nothing() {
    let (app, _) = build_test_app(test_config(&auth_backend().await));
    let (logs, _guard) = CapturedLogs::install();

    let response = post_form(
        app.clone(),
        "/auth/signin",
        "username=ada&password=nope&callback_url=%2Fdashboard%2Fusers",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/auth/signin?error=CredentialsSignin&callback_url=%2Fdashboard%2Fusers"
    );
    assert!(set_cookie(&response).is_none());
    assert!(logs.lines().is_empty(), "unexpected logs: {:?}", logs.lines());

    let page = body_text(get_page(app, location(&response), None).await).await;
    assert!(page.contains("Wrong username or password."));
    assert!(page.contains(r#"value="/dashboard/users""#));
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
    let (app, _) = build_test_app(test_config(NO_BACKEND));

    let response = post_form(app, "/auth/signin", "username=&password=").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin?error=CredentialsSignin");
}

#[tokio::test]
async fn backend_fault_looks_the_same_but_is_logged() {
    let (app, _) = build_test_app(test_config(&broken_backend().await));
    let (logs, _guard) = CapturedLogs::install();

    let response = post_form(app, "/auth/signin", "username=ada&password=s3cret").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin?error=CredentialsSignin");
    let lines = logs.lines();
    assert!(
        lines.iter().any(|l| l.contains("500") && l.contains("database is down")),
        "expected an error log, got {lines:?}"
    );
}

#[tokio::test]
async fn missing_secret_fails_sign_in_with_a_log_line() {
    let mut config = test_config(&auth_backend().await);
    config.session.secret = None;
    let (app, _) = build_test_app(config);
    let (logs, _guard) = CapturedLogs::install();

    let response = post_form(app, "/auth/signin", "username=ada&password=s3cret").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin?error=CredentialsSignin");
    assert!(set_cookie(&response).is_none());
    assert!(logs
        .lines()
        .iter()
        .any(|l| l.contains("Could not issue a session")));
}

// ---------------------------------------------------------------------------
// Test: sign-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sign_out_clears_cookie() {
    let (app, _) = build_test_app(test_config(NO_BACKEND));

    let response = send(app, Method::POST, "/auth/signout", None, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin");
    assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
}
