//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use chrono::{DateTime, Utc};
use quickdeck_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ConsoleEvent
// ---------------------------------------------------------------------------

/// The kind of change a [`ConsoleEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    MembersChanged,
}

impl ChangeKind {
    /// Dot-separated name used in logs, e.g. `"project.created"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::ProjectCreated => "project.created",
            ChangeKind::ProjectUpdated => "project.updated",
            ChangeKind::ProjectDeleted => "project.deleted",
            ChangeKind::MembersChanged => "project.members_changed",
        }
    }
}

/// A change accepted by the backend on behalf of a console user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleEvent {
    pub kind: ChangeKind,
    pub project_id: DbId,
    /// Id of the signed-in user that made the change.
    pub actor_user_id: DbId,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleEvent {
    pub fn new(kind: ChangeKind, project_id: DbId, actor_user_id: DbId) -> Self {
        Self {
            kind,
            project_id,
            actor_user_id,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use quickdeck_events::{ChangeKind, ConsoleEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ConsoleEvent::new(ChangeKind::ProjectCreated, 1, 42));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ConsoleEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` events behind observe
    /// `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ConsoleEvent) {
        // A SendError only means there are no receivers right now.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(ConsoleEvent::new(ChangeKind::MembersChanged, 12, 3));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.kind, ChangeKind::MembersChanged);
        assert_eq!(received.project_id, 12);
        assert_eq!(received.actor_user_id, 3);
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ConsoleEvent::new(ChangeKind::ProjectDeleted, 5, 1));

        assert_eq!(rx1.recv().await.unwrap().kind, ChangeKind::ProjectDeleted);
        assert_eq!(rx2.recv().await.unwrap().kind, ChangeKind::ProjectDeleted);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(ConsoleEvent::new(ChangeKind::ProjectCreated, 1, 1));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_value(ChangeKind::MembersChanged).unwrap();
        assert_eq!(json, "members_changed");
        assert_eq!(ChangeKind::ProjectUpdated.as_str(), "project.updated");
    }
}
