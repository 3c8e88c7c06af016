//! REST client for the QuickDeck backend.
//!
//! - [`client`] -- shared [`BackendClient`] plumbing (base URL, status checks).
//! - [`auth`] -- credential exchange: login + current-user fetch.
//! - [`projects`] -- project CRUD.
//! - [`users`] -- user directory.
//! - [`membership`] -- project membership calls and plan application.

pub mod auth;
pub mod client;
pub mod error;
pub mod membership;
pub mod projects;
pub mod users;

pub use auth::AuthFailure;
pub use client::BackendClient;
pub use error::BackendError;
pub use membership::{MembershipFailure, MembershipOp, MembershipOutcome};
