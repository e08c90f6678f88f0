use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use alerta_common::models::alert::Alert;
use alerta_common::traits::repository_traits::{AlertRepo, UpdateOutcome};
use alerta_common::AckError;

/// Tracks which notified users have confirmed receipt of an alert.
/// `acknowledged_by` only ever grows while the alert is active and is
/// frozen once the alert reaches a terminal state.
pub struct AcknowledgmentTracker {
    repo: Arc<dyn AlertRepo>,
}

impl AcknowledgmentTracker {
    pub fn new(repo: Arc<dyn AlertRepo>) -> Self {
        Self { repo }
    }

    /// Record that `user_id` has seen the alert. Only users in the
    /// notified set may acknowledge, and only while the alert is
    /// active. Acknowledging twice is a harmless no-op that returns
    /// the current record.
    pub async fn acknowledge(&self, alert_id: Uuid, user_id: Uuid) -> Result<Alert, AckError> {
        let alert = self.fetch(alert_id).await?;

        if !alert.notified_users.contains(&user_id) {
            return Err(AckError::NotNotified { alert_id, user_id });
        }
        if alert.status.is_terminal() {
            return Err(AckError::AlertTerminal(alert_id));
        }
        if alert.acknowledged_by.contains(&user_id) {
            debug!("user {} already acknowledged alert {}", user_id, alert_id);
            return Ok(alert);
        }

        match self.repo.add_acknowledgment(alert_id, user_id).await? {
            UpdateOutcome::Applied => {
                debug!("user {} acknowledged alert {}", user_id, alert_id);
                self.fetch(alert_id).await
            }
            // Either a concurrent duplicate landed first or the alert
            // just closed; a re-read tells the two apart.
            UpdateOutcome::PreconditionFailed => {
                let latest = self.fetch(alert_id).await?;
                if latest.acknowledged_by.contains(&user_id) {
                    Ok(latest)
                } else {
                    Err(AckError::AlertTerminal(alert_id))
                }
            }
        }
    }

    async fn fetch(&self, alert_id: Uuid) -> Result<Alert, AckError> {
        let maybe = self
            .repo
            .get(alert_id)
            .await
            .map_err(AckError::Infrastructure)?;
        maybe.ok_or(AckError::NotFound(alert_id))
    }
}
