//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests (`tests/common/mod.rs`) use the exact same
//! middleware stack, session gate included.

use std::time::Duration;

use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers;
use crate::middleware::gate::session_gate;
use crate::routes;
use crate::state::AppState;

/// Build the console [`Router`] with its full middleware stack.
///
/// Outermost first, a request passes through:
///
/// 1. CORS (answers preflights before anything else runs)
/// 2. Request ID assignment (`x-request-id`)
/// 3. Request/response tracing
/// 4. Request ID propagation onto the response
/// 5. Request timeout
/// 6. Panic recovery
/// 7. The session gate, which may redirect instead of routing
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let gate = axum::middleware::from_fn_with_state(state.clone(), session_gate);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::console_routes())
        // `.layer` wraps the fallback too, so `/` and unknown paths under
        // `/dashboard` still reach the gate.
        .fallback(handlers::not_found)
        .layer(gate)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the configured origins. Credentials are allowed so the session
/// cookie travels with cross-origin dashboard calls.
///
/// Panics on an origin that is not a valid header value.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
