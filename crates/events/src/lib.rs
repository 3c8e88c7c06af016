//! Change signals for the QuickDeck console.
//!
//! Mutating handlers publish a [`ConsoleEvent`] on the shared [`EventBus`]
//! after the backend accepts a change. Interested parts of the process
//! subscribe explicitly instead of listening for an ambient global signal.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`ConsoleEvent`] -- what changed, on which project, by whom.
//! - [`EventLog`] -- background subscriber that traces every event.

pub mod bus;
pub mod log;

pub use bus::{ChangeKind, ConsoleEvent, EventBus};
pub use log::EventLog;
