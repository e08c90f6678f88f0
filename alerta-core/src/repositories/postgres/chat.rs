// src/repositories/postgres/chat.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use alerta_common::models::chat::AlertChatMessage;
use alerta_common::traits::repository_traits::ChatMessageRepo;

use crate::Error;

pub struct PostgresChatMessageRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresChatMessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepo for PostgresChatMessageRepository {
    async fn append(&self, msg: &AlertChatMessage) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO alert_chat_messages (
                message_id, alert_id, sender_id, sender_name, message, sent_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
            .bind(msg.message_id)
            .bind(msg.alert_id)
            .bind(msg.sender_id)
            .bind(&msg.sender_name)
            .bind(&msg.message)
            .bind(msg.timestamp)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn for_alert(&self, alert_id: Uuid) -> Result<Vec<AlertChatMessage>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT message_id, alert_id, sender_id, sender_name, message, sent_at
            FROM alert_chat_messages
            WHERE alert_id = $1
            "#,
        )
            .bind(alert_id)
            .fetch_all(&self.pool)
            .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(AlertChatMessage {
                message_id: row.try_get("message_id")?,
                alert_id: row.try_get("alert_id")?,
                sender_id: row.try_get("sender_id")?,
                sender_name: row.try_get("sender_name")?,
                message: row.try_get("message")?,
                timestamp: row.try_get::<DateTime<Utc>, _>("sent_at")?,
            });
        }
        Ok(messages)
    }
}
