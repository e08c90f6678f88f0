use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use alerta_common::models::alert::{Alert, AlertStatus, NewAlert};

/// Creation parameters with sensible defaults; tests override fields
/// as needed.
pub fn sample_new_alert(notified_users: HashSet<Uuid>) -> NewAlert {
    NewAlert {
        emitter_id: Uuid::new_v4(),
        emitter_name: "Maria Lopez".to_string(),
        emitter_email: "maria@example.com".to_string(),
        location: "Block 4, north gate".to_string(),
        gps: None,
        description: "Suspicious activity near the gate".to_string(),
        configured_duration_minutes: 30,
        notified_users,
        extreme_mode: false,
        has_video: false,
    }
}

/// A fully-built alert record for tests that bypass the lifecycle
/// service (analytics windows, seeded stores).
pub fn sample_alert(emitter_name: &str, created_at: DateTime<Utc>, status: AlertStatus) -> Alert {
    let terminal = status != AlertStatus::Active;
    Alert {
        alert_id: Uuid::new_v4(),
        emitter_id: Uuid::new_v4(),
        emitter_name: emitter_name.to_string(),
        emitter_email: format!(
            "{}@example.com",
            emitter_name.to_lowercase().replace(' ', ".")
        ),
        location: "Main square".to_string(),
        gps: None,
        description: String::new(),
        created_at,
        status,
        configured_duration_minutes: 30,
        notified_users: HashSet::new(),
        acknowledged_by: HashSet::new(),
        extreme_mode: false,
        has_video: false,
        resolved_at: terminal.then(|| created_at + chrono::Duration::minutes(20)),
        resolved_by: None,
        auto_resolved: false,
    }
}
