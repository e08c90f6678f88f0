use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use alerta_common::models::alert::{Alert, AlertStatus, TerminalTransition};
use alerta_common::models::chat::AlertChatMessage;
use alerta_common::traits::repository_traits::{
    AlertRepo, ChatMessageRepo, UpdateOutcome,
};
use alerta_common::Error;

/// In-memory alert store with the same conditional-update contract as
/// the Postgres repository.
#[derive(Default)]
pub struct MemoryAlertRepo {
    alerts: Mutex<HashMap<Uuid, Alert>>,
}

impl MemoryAlertRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-built alert, bypassing the lifecycle service.
    pub fn insert(&self, alert: Alert) {
        self.alerts.lock().unwrap().insert(alert.alert_id, alert);
    }
}

#[async_trait]
impl AlertRepo for MemoryAlertRepo {
    async fn create(&self, alert: &Alert) -> Result<(), Error> {
        self.alerts
            .lock()
            .unwrap()
            .insert(alert.alert_id, alert.clone());
        Ok(())
    }

    async fn get(&self, alert_id: Uuid) -> Result<Option<Alert>, Error> {
        Ok(self.alerts.lock().unwrap().get(&alert_id).cloned())
    }

    async fn apply_transition(
        &self,
        alert_id: Uuid,
        expected: AlertStatus,
        transition: &TerminalTransition,
    ) -> Result<UpdateOutcome, Error> {
        let mut alerts = self.alerts.lock().unwrap();
        match alerts.get_mut(&alert_id) {
            Some(alert) if alert.status == expected => {
                alert.status = transition.status;
                alert.resolved_at = Some(transition.resolved_at);
                alert.resolved_by = transition.resolved_by;
                alert.auto_resolved = transition.auto_resolved;
                Ok(UpdateOutcome::Applied)
            }
            Some(_) | None => Ok(UpdateOutcome::PreconditionFailed),
        }
    }

    async fn add_acknowledgment(
        &self,
        alert_id: Uuid,
        user_id: Uuid,
    ) -> Result<UpdateOutcome, Error> {
        let mut alerts = self.alerts.lock().unwrap();
        match alerts.get_mut(&alert_id) {
            Some(alert)
                if alert.status == AlertStatus::Active
                    && !alert.acknowledged_by.contains(&user_id) =>
            {
                alert.acknowledged_by.insert(user_id);
                Ok(UpdateOutcome::Applied)
            }
            Some(_) | None => Ok(UpdateOutcome::PreconditionFailed),
        }
    }

    async fn recent_window(&self, limit: i64) -> Result<Vec<Alert>, Error> {
        let mut all: Vec<Alert> = self.alerts.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit.max(0) as usize);
        Ok(all)
    }

    async fn list_active(&self) -> Result<Vec<Alert>, Error> {
        let mut active: Vec<Alert> = self
            .alerts
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.status == AlertStatus::Active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(active)
    }
}

/// In-memory chat store. Returns messages in insertion (arrival) order,
/// like a store with no delivery-order guarantee; ordering is the
/// reader's job.
#[derive(Default)]
pub struct MemoryChatRepo {
    messages: Mutex<Vec<AlertChatMessage>>,
}

impl MemoryChatRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatMessageRepo for MemoryChatRepo {
    async fn append(&self, msg: &AlertChatMessage) -> Result<(), Error> {
        self.messages.lock().unwrap().push(msg.clone());
        Ok(())
    }

    async fn for_alert(&self, alert_id: Uuid) -> Result<Vec<AlertChatMessage>, Error> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.alert_id == alert_id)
            .cloned()
            .collect())
    }
}
