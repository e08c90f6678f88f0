// src/repositories/postgres/alert.rs

use std::collections::HashSet;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use alerta_common::models::alert::{Alert, AlertStatus, GpsPoint, TerminalTransition};
use alerta_common::traits::repository_traits::{AlertRepo, UpdateOutcome};

use crate::Error;

pub struct PostgresAlertRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresAlertRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_alert(row: &PgRow) -> Result<Alert, Error> {
        let status_text: String = row.try_get("status")?;
        let notified: Vec<Uuid> = row.try_get("notified_users")?;
        let acknowledged: Vec<Uuid> = row.try_get("acknowledged_by")?;

        let gps_lat: Option<f64> = row.try_get("gps_latitude")?;
        let gps_lng: Option<f64> = row.try_get("gps_longitude")?;
        let gps = match (gps_lat, gps_lng) {
            (Some(latitude), Some(longitude)) => Some(GpsPoint { latitude, longitude }),
            _ => None,
        };

        Ok(Alert {
            alert_id: row.try_get("alert_id")?,
            emitter_id: row.try_get("emitter_id")?,
            emitter_name: row.try_get("emitter_name")?,
            emitter_email: row.try_get("emitter_email")?,
            location: row.try_get("location")?,
            gps,
            description: row.try_get("description")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            status: AlertStatus::from_str(&status_text)?,
            configured_duration_minutes: row.try_get("configured_duration_minutes")?,
            notified_users: notified.into_iter().collect::<HashSet<_>>(),
            acknowledged_by: acknowledged.into_iter().collect::<HashSet<_>>(),
            extreme_mode: row.try_get("extreme_mode")?,
            has_video: row.try_get("has_video")?,
            resolved_at: row.try_get::<Option<DateTime<Utc>>, _>("resolved_at")?,
            resolved_by: row.try_get("resolved_by")?,
            auto_resolved: row.try_get("auto_resolved")?,
        })
    }
}

const ALERT_COLUMNS: &str = r#"
    alert_id, emitter_id, emitter_name, emitter_email,
    location, gps_latitude, gps_longitude, description,
    created_at, status, configured_duration_minutes,
    notified_users, acknowledged_by,
    extreme_mode, has_video,
    resolved_at, resolved_by, auto_resolved
"#;

#[async_trait]
impl AlertRepo for PostgresAlertRepository {
    async fn create(&self, alert: &Alert) -> Result<(), Error> {
        let notified: Vec<Uuid> = alert.notified_users.iter().copied().collect();
        let acknowledged: Vec<Uuid> = alert.acknowledged_by.iter().copied().collect();

        sqlx::query(
            r#"
            INSERT INTO alerts (
                alert_id, emitter_id, emitter_name, emitter_email,
                location, gps_latitude, gps_longitude, description,
                created_at, status, configured_duration_minutes,
                notified_users, acknowledged_by,
                extreme_mode, has_video,
                resolved_at, resolved_by, auto_resolved
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
            .bind(alert.alert_id)
            .bind(alert.emitter_id)
            .bind(&alert.emitter_name)
            .bind(&alert.emitter_email)
            .bind(&alert.location)
            .bind(alert.gps.map(|g| g.latitude))
            .bind(alert.gps.map(|g| g.longitude))
            .bind(&alert.description)
            .bind(alert.created_at)
            .bind(alert.status.as_str())
            .bind(alert.configured_duration_minutes)
            .bind(&notified)
            .bind(&acknowledged)
            .bind(alert.extreme_mode)
            .bind(alert.has_video)
            .bind(alert.resolved_at)
            .bind(alert.resolved_by)
            .bind(alert.auto_resolved)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, alert_id: Uuid) -> Result<Option<Alert>, Error> {
        let row = sqlx::query(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts WHERE alert_id = $1"
        ))
            .bind(alert_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_alert(&r)?)),
            None => Ok(None),
        }
    }

    async fn apply_transition(
        &self,
        alert_id: Uuid,
        expected: AlertStatus,
        transition: &TerminalTransition,
    ) -> Result<UpdateOutcome, Error> {
        // Conditional write: only succeeds if nobody else transitioned
        // the alert since the caller read it.
        let result = sqlx::query(
            r#"
            UPDATE alerts
            SET status = $2,
                resolved_at = $3,
                resolved_by = $4,
                auto_resolved = $5
            WHERE alert_id = $1
              AND status = $6
            "#,
        )
            .bind(alert_id)
            .bind(transition.status.as_str())
            .bind(transition.resolved_at)
            .bind(transition.resolved_by)
            .bind(transition.auto_resolved)
            .bind(expected.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Ok(UpdateOutcome::PreconditionFailed)
        } else {
            Ok(UpdateOutcome::Applied)
        }
    }

    async fn add_acknowledgment(
        &self,
        alert_id: Uuid,
        user_id: Uuid,
    ) -> Result<UpdateOutcome, Error> {
        // array_append guarded by membership and liveness checks gives
        // set-union semantics: concurrent acknowledgments from distinct
        // users never overwrite each other.
        let result = sqlx::query(
            r#"
            UPDATE alerts
            SET acknowledged_by = array_append(acknowledged_by, $2)
            WHERE alert_id = $1
              AND status = 'active'
              AND NOT ($2 = ANY(acknowledged_by))
            "#,
        )
            .bind(alert_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            Ok(UpdateOutcome::PreconditionFailed)
        } else {
            Ok(UpdateOutcome::Applied)
        }
    }

    async fn recent_window(&self, limit: i64) -> Result<Vec<Alert>, Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ALERT_COLUMNS}
            FROM alerts
            ORDER BY created_at DESC
            LIMIT $1
            "#
        ))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let mut alerts = Vec::with_capacity(rows.len());
        for row in rows {
            alerts.push(Self::row_to_alert(&row)?);
        }
        Ok(alerts)
    }

    async fn list_active(&self) -> Result<Vec<Alert>, Error> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ALERT_COLUMNS}
            FROM alerts
            WHERE status = 'active'
            ORDER BY created_at ASC
            "#
        ))
            .fetch_all(&self.pool)
            .await?;

        let mut alerts = Vec::with_capacity(rows.len());
        for row in rows {
            alerts.push(Self::row_to_alert(&row)?);
        }
        Ok(alerts)
    }
}
