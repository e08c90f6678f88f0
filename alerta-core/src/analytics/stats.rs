// src/analytics/stats.rs
//
// Aggregate statistics and the system-health rollup over the
// unfiltered history window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use alerta_common::models::alert::{Alert, AlertStatus};

/// Coarse classification of overall alert-handling quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemHealth {
    Excellent,
    Good,
    Warning,
    Critical,
}

/// Emitter with the most alerts in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUser {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertStatistics {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    pub expired: usize,
    pub last_24h: usize,
    pub last_7d: usize,
    pub last_30d: usize,
    /// Mean minutes from creation to resolution, over resolved alerts
    /// only; 0 when none exist.
    pub avg_resolution_minutes: f64,
    /// Top 5 emitters by alert count, ties in first-seen order.
    pub top_users: Vec<TopUser>,
    /// Percentage of alerts with at least one acknowledgment.
    pub confirmation_efficiency: f64,
    pub health: SystemHealth,
}

/// Health rules, checked in fixed priority order; the first match wins.
/// The two signals are never averaged.
pub fn classify_health(active: usize, total: usize, efficiency: f64) -> SystemHealth {
    let active_ratio = if total == 0 {
        0.0
    } else {
        active as f64 / total as f64
    };

    if active_ratio > 0.20 || efficiency < 70.0 {
        SystemHealth::Critical
    } else if active_ratio > 0.10 || efficiency < 85.0 {
        SystemHealth::Warning
    } else if active_ratio > 0.05 || efficiency < 95.0 {
        SystemHealth::Good
    } else {
        SystemHealth::Excellent
    }
}

/// Compute the aggregate statistics for a window of alerts, as of
/// `now`. Read-only; the window is whatever bounded slice of history
/// the caller fetched.
pub fn compute_statistics(window: &[Alert], now: DateTime<Utc>) -> AlertStatistics {
    let total = window.len();

    let mut active = 0;
    let mut resolved = 0;
    let mut expired = 0;
    for alert in window {
        match alert.status {
            AlertStatus::Active => active += 1,
            AlertStatus::Resolved => resolved += 1,
            AlertStatus::Expired => expired += 1,
        }
    }

    let last_24h = count_since(window, now - Duration::hours(24));
    let last_7d = count_since(window, now - Duration::days(7));
    let last_30d = count_since(window, now - Duration::days(30));

    // Mean resolution time over resolved alerts with a stamped end.
    let mut resolution_total_minutes = 0.0;
    let mut resolution_samples = 0usize;
    for alert in window {
        if alert.status == AlertStatus::Resolved {
            if let Some(end) = alert.resolved_at {
                resolution_total_minutes += (end - alert.created_at).num_seconds() as f64 / 60.0;
                resolution_samples += 1;
            }
        }
    }
    let avg_resolution_minutes = if resolution_samples == 0 {
        0.0
    } else {
        resolution_total_minutes / resolution_samples as f64
    };

    let top_users = top_emitters(window, 5);

    // An empty window has nothing unacknowledged, so it reads as fully
    // efficient rather than zero.
    let confirmation_efficiency = if total == 0 {
        100.0
    } else {
        let acknowledged = window.iter().filter(|a| a.has_acknowledgment()).count();
        acknowledged as f64 / total as f64 * 100.0
    };

    let health = classify_health(active, total, confirmation_efficiency);

    AlertStatistics {
        total,
        active,
        resolved,
        expired,
        last_24h,
        last_7d,
        last_30d,
        avg_resolution_minutes,
        top_users,
        confirmation_efficiency,
        health,
    }
}

fn count_since(window: &[Alert], cutoff: DateTime<Utc>) -> usize {
    window.iter().filter(|a| a.created_at >= cutoff).count()
}

/// Emitter-name counts, descending, top `limit`; ties keep first-seen
/// order thanks to the stable sort.
fn top_emitters(window: &[Alert], limit: usize) -> Vec<TopUser> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for alert in window {
        let entry = counts.entry(alert.emitter_name.clone()).or_insert(0);
        if *entry == 0 {
            order.push(alert.emitter_name.clone());
        }
        *entry += 1;
    }

    let mut users: Vec<TopUser> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            TopUser { name, count }
        })
        .collect();

    users.sort_by(|a, b| b.count.cmp(&a.count));
    users.truncate(limit);
    users
}
