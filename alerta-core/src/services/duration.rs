use chrono::{DateTime, Duration, Utc};

use alerta_common::models::alert::Alert;

use crate::utils::time::minutes_between;

/// Live countdown state for an active alert. Always recomputed from
/// `created_at` and the configured duration; there is no running timer
/// to drift, so the value is correct even after the observer slept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(Duration),
    /// The deadline has passed; the caller should trigger
    /// `expire_if_overdue` rather than display a negative duration.
    Expired,
}

/// How the real handling time compares with the configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationVerdict {
    ResolvedEarly,
    OnTime,
    ResolvedLate,
}

/// Post-hoc comparison of configured vs. real elapsed time. Purely
/// informational; never feeds back into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationReport {
    /// Whole minutes from creation to resolution (floored). For a
    /// still-active alert this measures up to the observation instant.
    pub real_minutes: i64,
    /// Configured minutes minus real minutes: positive means early.
    pub difference_minutes: i64,
    pub verdict: DurationVerdict,
}

/// Time left before the nominal deadline, as of `now`.
pub fn live_countdown(alert: &Alert, now: DateTime<Utc>) -> Countdown {
    let remaining = alert.expires_at() - now;
    if remaining <= Duration::zero() {
        Countdown::Expired
    } else {
        Countdown::Remaining(remaining)
    }
}

/// Classify how the alert's real duration compares with its budget.
/// For terminal alerts the end point is `resolved_at`; for an alert
/// inspected while still active it is `now`.
pub fn classify(alert: &Alert, now: DateTime<Utc>) -> DurationReport {
    let end = alert.resolved_at.unwrap_or(now);
    let real_minutes = minutes_between(alert.created_at, end);
    let difference_minutes = alert.configured_duration_minutes - real_minutes;

    let verdict = if difference_minutes > 0 {
        DurationVerdict::ResolvedEarly
    } else if difference_minutes < 0 {
        DurationVerdict::ResolvedLate
    } else {
        DurationVerdict::OnTime
    };

    DurationReport {
        real_minutes,
        difference_minutes,
        verdict,
    }
}
