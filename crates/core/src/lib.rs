//! Domain types and pure logic for the QuickDeck console.
//!
//! Nothing in this crate performs I/O. The HTTP client lives in
//! `quickdeck-backend` and the server in `quickdeck-web`.

pub mod base_url;
pub mod error;
pub mod gate;
pub mod identity;
pub mod membership;
pub mod project;
pub mod types;
