//! Session primitives.
//!
//! - [`session`] -- signed, stateless session tokens (HS256 JWT).
//! - [`cookie`] -- reading and writing the session cookie.

pub mod cookie;
pub mod session;
