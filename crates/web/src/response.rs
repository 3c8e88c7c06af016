//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for mutations: `{ "data": T, "changed": bool }`.
///
/// `changed` tells the caller whether it should re-fetch its lists; the
/// server does not push refreshes.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub data: T,
    pub changed: bool,
}
