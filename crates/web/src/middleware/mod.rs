//! Request middleware and extractors.
//!
//! - [`gate::session_gate`] -- decodes the session and applies the routing
//!   policy before any handler runs.
//! - [`auth::SessionUser`] -- the signed-in identity, for handlers.

pub mod auth;
pub mod gate;
