//! Redirects that honour the configured public URL.

use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::response::Redirect;
use quickdeck_core::base_url::{absolute_url, resolve_base_url, RequestOrigin};

use crate::config::ServerConfig;

/// Origin the request was addressed to, from `Host` and proxy headers.
pub fn request_origin(headers: &HeaderMap) -> Option<RequestOrigin> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    RequestOrigin::from_headers(
        headers.get(HOST).and_then(|v| v.to_str().ok()),
        header("x-forwarded-host"),
        header("x-forwarded-proto"),
    )
}

/// Absolute URL for `path`, resolved against this request.
pub fn location_for(config: &ServerConfig, headers: &HeaderMap, path: &str) -> String {
    let origin = request_origin(headers);
    let base = resolve_base_url(config.public_url.as_deref(), origin.as_ref());
    absolute_url(base.as_deref(), path)
}

/// `303 See Other` to `path`, resolved against this request.
pub fn see_other(config: &ServerConfig, headers: &HeaderMap, path: &str) -> Redirect {
    Redirect::to(&location_for(config, headers, path))
}
