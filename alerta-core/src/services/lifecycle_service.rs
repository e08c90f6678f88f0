use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use alerta_common::models::actor::Actor;
use alerta_common::models::alert::{Alert, AlertStatus, NewAlert, TerminalTransition};
use alerta_common::traits::repository_traits::{AlertRepo, UpdateOutcome};
use alerta_common::{Error, LifecycleError};

use crate::utils::time::Clock;

/// Owns the alert state machine: `Active` is the only live state,
/// `Resolved` and `Expired` are terminal, and no transition ever leads
/// back out of a terminal state.
///
/// The service is stateless between calls: each operation reads the
/// current record, computes the transition, and writes it back through
/// the store's conditional update. When two transitions race, exactly
/// one write lands; the loser re-reads and reports `AlreadyTerminal`.
pub struct AlertLifecycleService {
    repo: Arc<dyn AlertRepo>,
    clock: Arc<dyn Clock>,
}

impl AlertLifecycleService {
    pub fn new(repo: Arc<dyn AlertRepo>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Create a new alert in `Active` status. The notified-user set
    /// arrives already resolved; nobody has acknowledged yet.
    pub async fn create_alert(&self, new_alert: NewAlert) -> Result<Alert, Error> {
        if new_alert.configured_duration_minutes <= 0 {
            return Err(Error::Parse(format!(
                "configured_duration_minutes must be positive, got {}",
                new_alert.configured_duration_minutes
            )));
        }

        let alert = Alert {
            alert_id: Uuid::new_v4(),
            emitter_id: new_alert.emitter_id,
            emitter_name: new_alert.emitter_name,
            emitter_email: new_alert.emitter_email,
            location: new_alert.location,
            gps: new_alert.gps,
            description: new_alert.description,
            created_at: self.clock.now(),
            status: AlertStatus::Active,
            configured_duration_minutes: new_alert.configured_duration_minutes,
            notified_users: new_alert.notified_users,
            acknowledged_by: HashSet::new(),
            extreme_mode: new_alert.extreme_mode,
            has_video: new_alert.has_video,
            resolved_at: None,
            resolved_by: None,
            auto_resolved: false,
        };

        self.repo.create(&alert).await?;
        info!(
            "created alert {} for emitter '{}' ({} notified, {}min)",
            alert.alert_id,
            alert.emitter_name,
            alert.notified_users.len(),
            alert.configured_duration_minutes
        );
        Ok(alert)
    }

    /// Operator handled the emergency. Valid only from `Active`.
    pub async fn resolve(&self, alert_id: Uuid, actor: &Actor) -> Result<Alert, LifecycleError> {
        self.manual_transition(alert_id, AlertStatus::Resolved, actor).await
    }

    /// Operator judged the alert moot or false. Mechanically identical
    /// to `resolve` but records the `Expired` status so reporting can
    /// tell "handled" from "dismissed".
    pub async fn deactivate(&self, alert_id: Uuid, actor: &Actor) -> Result<Alert, LifecycleError> {
        self.manual_transition(alert_id, AlertStatus::Expired, actor).await
    }

    /// Expire the alert if its nominal deadline has passed. A no-op
    /// (returning the unchanged alert) while the deadline is still in
    /// the future; `AlreadyTerminal` if the alert was already closed.
    ///
    /// `resolved_at` is pinned to the nominal deadline rather than the
    /// instant the sweep noticed, so duration analysis stays
    /// deterministic however late the sweep runs.
    pub async fn expire_if_overdue(&self, alert_id: Uuid) -> Result<Alert, LifecycleError> {
        let alert = self.fetch(alert_id).await?;
        if alert.status.is_terminal() {
            return Err(LifecycleError::AlreadyTerminal(alert_id));
        }

        let deadline = alert.expires_at();
        if self.clock.now() < deadline {
            debug!("alert {} not overdue yet", alert_id);
            return Ok(alert);
        }

        let transition = TerminalTransition {
            status: AlertStatus::Expired,
            resolved_at: deadline,
            resolved_by: None,
            auto_resolved: true,
        };

        match self
            .repo
            .apply_transition(alert_id, AlertStatus::Active, &transition)
            .await?
        {
            UpdateOutcome::Applied => {
                info!("alert {} auto-expired at its {}min deadline", alert_id, alert.configured_duration_minutes);
                Ok(Self::applied(alert, &transition))
            }
            // A manual transition won the race. Normal outcome.
            UpdateOutcome::PreconditionFailed => Err(LifecycleError::AlreadyTerminal(alert_id)),
        }
    }

    async fn manual_transition(
        &self,
        alert_id: Uuid,
        to: AlertStatus,
        actor: &Actor,
    ) -> Result<Alert, LifecycleError> {
        let alert = self.fetch(alert_id).await?;
        if alert.status.is_terminal() {
            return Err(LifecycleError::AlreadyTerminal(alert_id));
        }

        let transition = TerminalTransition {
            status: to,
            resolved_at: self.clock.now(),
            resolved_by: Some(actor.id),
            auto_resolved: false,
        };

        match self
            .repo
            .apply_transition(alert_id, AlertStatus::Active, &transition)
            .await?
        {
            UpdateOutcome::Applied => {
                info!("alert {} transitioned to {} by {}", alert_id, to, actor.id);
                Ok(Self::applied(alert, &transition))
            }
            // Someone else (operator or sweep) closed it first.
            UpdateOutcome::PreconditionFailed => Err(LifecycleError::AlreadyTerminal(alert_id)),
        }
    }

    async fn fetch(&self, alert_id: Uuid) -> Result<Alert, LifecycleError> {
        let maybe = self.repo.get(alert_id).await.map_err(LifecycleError::Infrastructure)?;
        maybe.ok_or(LifecycleError::NotFound(alert_id))
    }

    /// The authoritative post-transition state: the record as read,
    /// with exactly the transition fields rewritten.
    fn applied(mut alert: Alert, transition: &TerminalTransition) -> Alert {
        alert.status = transition.status;
        alert.resolved_at = Some(transition.resolved_at);
        alert.resolved_by = transition.resolved_by;
        alert.auto_resolved = transition.auto_resolved;
        alert
    }
}
