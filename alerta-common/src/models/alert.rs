use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Closed status enum for an alert's lifecycle. `Active` is the only
/// initial state; `Resolved` and `Expired` are both terminal and no
/// transition leads out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
    Expired,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AlertStatus::Active)
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "active" => Ok(AlertStatus::Active),
            "resolved" => Ok(AlertStatus::Resolved),
            "expired" => Ok(AlertStatus::Expired),
            other => Err(Error::Parse(format!("unknown alert status: {other}"))),
        }
    }
}

/// GPS fix attached to an alert. Latitude and longitude always travel
/// together; an alert either has a full fix or none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One emergency report with a bounded lifecycle.
///
/// `expires_at` is intentionally not a field: it is always recomputed
/// from `created_at` and `configured_duration_minutes` so a stored
/// absolute deadline can never drift from its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: Uuid,
    pub emitter_id: Uuid,
    pub emitter_name: String,
    pub emitter_email: String,
    pub location: String,
    pub gps: Option<GpsPoint>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
    pub configured_duration_minutes: i64,
    pub notified_users: HashSet<Uuid>,
    pub acknowledged_by: HashSet<Uuid>,
    pub extreme_mode: bool,
    pub has_video: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<Uuid>,
    pub auto_resolved: bool,
}

impl Alert {
    /// Nominal deadline derived from the two immutable creation inputs.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::minutes(self.configured_duration_minutes)
    }

    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// `|acknowledged_by| / |notified_users|`, 0.0 when nobody was
    /// notified rather than a division by zero.
    pub fn confirmation_rate(&self) -> f64 {
        if self.notified_users.is_empty() {
            return 0.0;
        }
        self.acknowledged_by.len() as f64 / self.notified_users.len() as f64
    }

    pub fn has_acknowledgment(&self) -> bool {
        !self.acknowledged_by.is_empty()
    }
}

/// Creation parameters for a new alert. The notified-user list arrives
/// already resolved by the external contact-resolution step.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub emitter_id: Uuid,
    pub emitter_name: String,
    pub emitter_email: String,
    pub location: String,
    pub gps: Option<GpsPoint>,
    pub description: String,
    pub configured_duration_minutes: i64,
    pub notified_users: HashSet<Uuid>,
    pub extreme_mode: bool,
    pub has_video: bool,
}

/// The only patch shape a status transition may write. Every write of
/// one of these is conditional on the status the caller last read.
#[derive(Debug, Clone, Copy)]
pub struct TerminalTransition {
    pub status: AlertStatus,
    pub resolved_at: DateTime<Utc>,
    pub resolved_by: Option<Uuid>,
    pub auto_resolved: bool,
}
