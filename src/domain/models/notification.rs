use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Sms,
    Whatsapp,
}

impl NotificationChannel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sms" => Some(Self::Sms),
            "whatsapp" => Some(Self::Whatsapp),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NotificationLog {
    pub id: String,
    pub tenant_id: Option<String>,
    pub recipient_phone: String,
    pub channel: NotificationChannel,
    pub message: String,
    pub status: NotificationStatus,
    pub error_message: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl NotificationLog {
    pub fn new(
        tenant_id: Option<String>,
        recipient_phone: String,
        channel: NotificationChannel,
        message: String,
        status: NotificationStatus,
        error_message: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            recipient_phone,
            channel,
            message,
            status,
            error_message,
            sent_at: Utc::now(),
        }
    }
}
