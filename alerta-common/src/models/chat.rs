use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a single chat message scoped to one alert. Messages are
/// append-only: never edited, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertChatMessage {
    pub message_id: Uuid,
    pub alert_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl AlertChatMessage {
    pub fn new(
        alert_id: Uuid,
        sender_id: Uuid,
        sender_name: &str,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            alert_id,
            sender_id,
            sender_name: sender_name.to_string(),
            message: message.to_string(),
            timestamp,
        }
    }

    /// Presentation hook: messages from the alert's emitter render
    /// differently from messages by other notified parties.
    pub fn is_from_emitter(&self, emitter_id: Uuid) -> bool {
        self.sender_id == emitter_id
    }
}
