use axum::{extract::{State, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::SendNotificationRequest;
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::notification::{NotificationChannel, NotificationLog, NotificationStatus};
use crate::domain::services::validators;
use crate::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
pub struct NotificationListQuery {
    pub tenant_id: Option<String>,
}

pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_phone(&payload.recipient_phone)?;
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".into()));
    }

    let channel = match payload.channel.as_deref() {
        None => NotificationChannel::Sms,
        Some(value) => NotificationChannel::parse(value)
            .ok_or_else(|| AppError::Validation(format!("Invalid channel: {}", value)))?,
    };

    if let Some(tenant_id) = &payload.tenant_id {
        state.tenant_repo.find_by_id(tenant_id).await?
            .ok_or(AppError::NotFound("Tenant not found".into()))?;
    }

    let send_result = state
        .sms_gateway
        .send(&payload.recipient_phone, channel, &payload.message)
        .await;

    // The outcome is logged either way; a gateway failure still leaves a row.
    let (status, error_message) = match &send_result {
        Ok(()) => (NotificationStatus::Sent, None),
        Err(err) => (NotificationStatus::Failed, Some(err.to_string())),
    };

    let entry = NotificationLog::new(
        payload.tenant_id,
        payload.recipient_phone,
        channel,
        payload.message,
        status,
        error_message,
    );
    let logged = state.notification_repo.log(&entry).await?;

    match send_result {
        Ok(()) => {
            info!("Notification sent: {} via {:?}", logged.id, logged.channel);
            Ok((StatusCode::CREATED, ApiResponse::ok(logged)))
        }
        Err(err) => {
            warn!("Notification delivery failed for {}: {}", logged.id, err);
            Err(err)
        }
    }
}

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = match query.tenant_id {
        Some(tenant_id) => state.notification_repo.list_by_tenant(&tenant_id).await?,
        None => state.notification_repo.list().await?,
    };
    Ok(ApiResponse::ok(entries))
}
