// tests/sweep_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use alerta_common::models::actor::{Actor, ActorRole};
use alerta_common::models::alert::AlertStatus;
use alerta_common::traits::repository_traits::AlertRepo;
use alerta_common::Error;
use alerta_core::services::AlertLifecycleService;
use alerta_core::tasks::sweep_overdue_alerts;
use alerta_core::test_utils::{init_test_tracing, sample_new_alert, MemoryAlertRepo};
use alerta_core::utils::time::ManualClock;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

fn setup() -> (Arc<MemoryAlertRepo>, Arc<ManualClock>, AlertLifecycleService) {
    init_test_tracing();
    let repo = Arc::new(MemoryAlertRepo::new());
    let clock = Arc::new(ManualClock::new(base_time()));
    let lifecycle = AlertLifecycleService::new(repo.clone(), clock.clone());
    (repo, clock, lifecycle)
}

#[tokio::test]
async fn test_sweep_expires_only_overdue_alerts() -> Result<(), Error> {
    let (repo, clock, lifecycle) = setup();

    // 30-minute budget, created now.
    let fresh = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;

    // 5-minute budget, created now: overdue once the clock jumps.
    let mut short = sample_new_alert(HashSet::new());
    short.configured_duration_minutes = 5;
    let overdue = lifecycle.create_alert(short).await?;

    clock.advance(Duration::minutes(10));

    let outcome = sweep_overdue_alerts(repo.as_ref(), &lifecycle).await?;
    assert_eq!(outcome.scanned, 2);
    assert_eq!(outcome.expired, 1);

    let still_active = repo.get(fresh.alert_id).await?.unwrap();
    assert_eq!(still_active.status, AlertStatus::Active);

    let expired = repo.get(overdue.alert_id).await?.unwrap();
    assert_eq!(expired.status, AlertStatus::Expired);
    assert!(expired.auto_resolved);
    assert_eq!(expired.resolved_at, Some(base_time() + Duration::minutes(5)));
    Ok(())
}

#[tokio::test]
async fn test_sweep_is_safe_to_run_redundantly() -> Result<(), Error> {
    let (repo, clock, lifecycle) = setup();

    let mut short = sample_new_alert(HashSet::new());
    short.configured_duration_minutes = 5;
    lifecycle.create_alert(short).await?;

    clock.advance(Duration::minutes(10));

    let first = sweep_overdue_alerts(repo.as_ref(), &lifecycle).await?;
    assert_eq!(first.expired, 1);

    // The alert is terminal now, so a second pass finds nothing to scan
    // and nothing to expire.
    let second = sweep_overdue_alerts(repo.as_ref(), &lifecycle).await?;
    assert_eq!(second.scanned, 0);
    assert_eq!(second.expired, 0);
    Ok(())
}

#[tokio::test]
async fn test_sweep_tolerates_concurrent_manual_resolution() -> Result<(), Error> {
    let (repo, clock, lifecycle) = setup();

    let mut short = sample_new_alert(HashSet::new());
    short.configured_duration_minutes = 5;
    let alert = lifecycle.create_alert(short).await?;

    clock.advance(Duration::minutes(10));

    // An operator resolves between the sweep's listing and its expiry
    // attempt; the sweep must shrug, not fail.
    let listed = repo.list_active().await?;
    assert_eq!(listed.len(), 1);
    let actor = Actor::new(Uuid::new_v4(), ActorRole::Admin);
    lifecycle.resolve(alert.alert_id, &actor).await.unwrap();

    let outcome = sweep_overdue_alerts(repo.as_ref(), &lifecycle).await?;
    assert_eq!(outcome.expired, 0);

    let stored = repo.get(alert.alert_id).await?.unwrap();
    assert_eq!(stored.status, AlertStatus::Resolved);
    assert_eq!(stored.resolved_by, Some(actor.id));
    Ok(())
}
