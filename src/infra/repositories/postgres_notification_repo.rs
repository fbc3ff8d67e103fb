use crate::domain::{models::notification::NotificationLog, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepo {
    async fn log(&self, entry: &NotificationLog) -> Result<NotificationLog, AppError> {
        sqlx::query_as::<_, NotificationLog>(
            "INSERT INTO notification_log (id, tenant_id, recipient_phone, channel, message, status, error_message, sent_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&entry.id)
            .bind(&entry.tenant_id)
            .bind(&entry.recipient_phone)
            .bind(entry.channel)
            .bind(&entry.message)
            .bind(entry.status)
            .bind(&entry.error_message)
            .bind(entry.sent_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<NotificationLog>, AppError> {
        sqlx::query_as::<_, NotificationLog>("SELECT * FROM notification_log ORDER BY sent_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<NotificationLog>, AppError> {
        sqlx::query_as::<_, NotificationLog>(
            "SELECT * FROM notification_log WHERE tenant_id = $1 ORDER BY sent_at DESC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
