// alerta-core/src/tasks/expiry_sweep.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use alerta_common::models::alert::AlertStatus;
use alerta_common::traits::repository_traits::AlertRepo;
use alerta_common::{Error, LifecycleError};

use crate::services::lifecycle_service::AlertLifecycleService;

#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOutcome {
    /// Active alerts examined.
    pub scanned: usize,
    /// Alerts this pass transitioned to `Expired`.
    pub expired: usize,
}

/// One pass over all active alerts, expiring those past their nominal
/// deadline. Safe to run redundantly and concurrently with manual
/// resolve/deactivate: a lost race surfaces as `AlreadyTerminal` and is
/// counted as already handled, not an error.
pub async fn sweep_overdue_alerts(
    repo: &dyn AlertRepo,
    lifecycle: &AlertLifecycleService,
) -> Result<SweepOutcome, Error> {
    let active = repo.list_active().await?;

    let mut outcome = SweepOutcome {
        scanned: active.len(),
        ..Default::default()
    };

    for alert in active {
        match lifecycle.expire_if_overdue(alert.alert_id).await {
            Ok(updated) => {
                if updated.status == AlertStatus::Expired {
                    outcome.expired += 1;
                }
            }
            // Closed between the listing and our attempt.
            Err(LifecycleError::AlreadyTerminal(_)) | Err(LifecycleError::NotFound(_)) => {}
            Err(LifecycleError::Infrastructure(e)) => return Err(e),
        }
    }

    if outcome.expired > 0 {
        info!(
            "expiry sweep: {} of {} active alerts expired",
            outcome.expired, outcome.scanned
        );
    }
    Ok(outcome)
}

/// Spawns a background task that periodically sweeps overdue alerts.
pub fn spawn_expiry_sweep(
    repo: Arc<dyn AlertRepo>,
    lifecycle: Arc<AlertLifecycleService>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            if let Err(e) = sweep_overdue_alerts(repo.as_ref(), &lifecycle).await {
                warn!("expiry sweep failed: {e}");
            }
        }
    })
}
