use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use alerta_common::models::chat::AlertChatMessage;
use alerta_common::traits::repository_traits::{AlertRepo, ChatMessageRepo};
use alerta_common::ChatError;

use crate::utils::time::Clock;

/// Append-only message stream scoped to one alert. Writes are accepted
/// only while the alert is active; reads are always permitted, also on
/// closed alerts.
pub struct ChatLogService {
    alert_repo: Arc<dyn AlertRepo>,
    chat_repo: Arc<dyn ChatMessageRepo>,
    clock: Arc<dyn Clock>,
}

impl ChatLogService {
    pub fn new(
        alert_repo: Arc<dyn AlertRepo>,
        chat_repo: Arc<dyn ChatMessageRepo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            alert_repo,
            chat_repo,
            clock,
        }
    }

    /// Append a message to the alert's stream, stamped with the
    /// injected clock. Blank text (after trimming) is rejected.
    pub async fn append(
        &self,
        alert_id: Uuid,
        sender_id: Uuid,
        sender_name: &str,
        text: &str,
    ) -> Result<AlertChatMessage, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let alert = self
            .alert_repo
            .get(alert_id)
            .await
            .map_err(ChatError::Infrastructure)?
            .ok_or(ChatError::NotFound(alert_id))?;

        if alert.status.is_terminal() {
            return Err(ChatError::AlertTerminal(alert_id));
        }

        let msg = AlertChatMessage::new(alert_id, sender_id, sender_name, trimmed, self.clock.now());
        self.chat_repo
            .append(&msg)
            .await
            .map_err(ChatError::Infrastructure)?;

        debug!("message {} appended to alert {}", msg.message_id, alert_id);
        Ok(msg)
    }

    /// All messages for the alert, oldest first. The store does not
    /// guarantee write-order delivery, so the stream is re-sorted at
    /// read time; the sort is stable, so same-timestamp messages keep
    /// their insertion order. A pure, repeatable read.
    pub async fn list(&self, alert_id: Uuid) -> Result<Vec<AlertChatMessage>, ChatError> {
        let exists = self
            .alert_repo
            .get(alert_id)
            .await
            .map_err(ChatError::Infrastructure)?
            .is_some();
        if !exists {
            return Err(ChatError::NotFound(alert_id));
        }

        let mut messages = self
            .chat_repo
            .for_alert(alert_id)
            .await
            .map_err(ChatError::Infrastructure)?;
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}
