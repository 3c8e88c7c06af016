//! Background subscriber that records console changes in the trace log.

use tokio::sync::broadcast;

use crate::bus::ConsoleEvent;

/// Traces every [`ConsoleEvent`] it receives.
pub struct EventLog;

impl EventLog {
    /// Run until the bus is dropped. Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<ConsoleEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event = event.kind.as_str(),
                        project_id = event.project_id,
                        actor_user_id = event.actor_user_id,
                        at = %event.timestamp,
                        "Console change"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event log lagged, some changes were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Event bus closed, event log shutting down");
                    break;
                }
            }
        }
        logged
    }
}
