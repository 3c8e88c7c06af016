//! QuickDeck console server library.
//!
//! Exposes the building blocks (config, state, session handling, gate,
//! routes) so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
