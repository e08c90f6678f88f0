use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::alert::{Alert, AlertStatus, TerminalTransition};
use crate::models::chat::AlertChatMessage;

/// Result of a conditional write. `PreconditionFailed` means the record
/// no longer matched the status the caller read; it is an expected
/// outcome of concurrent transitions, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    PreconditionFailed,
}

/// Store adapter for alerts. All status writes are conditional on the
/// previously-read status (optimistic concurrency): of two racing
/// transition attempts exactly one observes `Applied`.
#[async_trait]
pub trait AlertRepo: Send + Sync {
    async fn create(&self, alert: &Alert) -> Result<(), Error>;

    async fn get(&self, alert_id: Uuid) -> Result<Option<Alert>, Error>;

    /// Write a terminal transition only if the stored status still
    /// equals `expected`.
    async fn apply_transition(
        &self,
        alert_id: Uuid,
        expected: AlertStatus,
        transition: &TerminalTransition,
    ) -> Result<UpdateOutcome, Error>;

    /// Add `user_id` to the alert's acknowledged set with set-union
    /// semantics (never last-write-overwrite), only while the alert is
    /// still active. Reports `PreconditionFailed` when the user is
    /// already present or the alert is no longer active; the caller
    /// re-reads to distinguish the two.
    async fn add_acknowledgment(
        &self,
        alert_id: Uuid,
        user_id: Uuid,
    ) -> Result<UpdateOutcome, Error>;

    /// Most recent `limit` alerts by `created_at` descending: the
    /// bounded history window the analytics engine computes over.
    async fn recent_window(&self, limit: i64) -> Result<Vec<Alert>, Error>;

    /// All alerts still in `active` status, for the expiry sweep.
    async fn list_active(&self) -> Result<Vec<Alert>, Error>;
}

/// Store adapter for the per-alert chat stream.
#[async_trait]
pub trait ChatMessageRepo: Send + Sync {
    async fn append(&self, msg: &AlertChatMessage) -> Result<(), Error>;

    /// All messages for one alert, in whatever order the store returns
    /// them. Callers re-sort at read time.
    async fn for_alert(&self, alert_id: Uuid) -> Result<Vec<AlertChatMessage>, Error>;
}
