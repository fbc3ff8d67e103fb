use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CancelCommissionRequest, CreateCommissionRequest, PayCommissionRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::commission::{Commission, CommissionChanges, NewCommissionParams};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_commission(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCommissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.agent_name.trim().is_empty() {
        return Err(AppError::Validation("agent_name is required".into()));
    }
    if let Some(phone) = &payload.agent_phone {
        validators::validate_phone(phone)?;
    }
    validators::validate_positive_amount("commission_amount_cents", payload.commission_amount_cents)?;

    let commission = Commission::new(NewCommissionParams {
        agent_name: payload.agent_name,
        agent_phone: payload.agent_phone,
        property_id: payload.property_id,
        tenant_id: payload.tenant_id,
        commission_amount_cents: payload.commission_amount_cents,
        notes: payload.notes,
    });

    let created = state.commission_repo.create(&commission).await?;
    info!("Commission created: {} for agent {}", created.id, created.agent_name);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_commission(
    State(state): State<Arc<AppState>>,
    Path(commission_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let commission = state.commission_repo.find_by_id(&commission_id).await?
        .ok_or(AppError::NotFound("Commission not found".into()))?;
    Ok(ApiResponse::ok(commission))
}

pub async fn list_commissions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let commissions = state.commission_repo.list().await?;
    Ok(ApiResponse::ok(commissions))
}

pub async fn update_commission(
    State(state): State<Arc<AppState>>,
    Path(commission_id): Path<String>,
    Json(changes): Json<CommissionChanges>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(amount) = changes.commission_amount_cents {
        validators::validate_positive_amount("commission_amount_cents", amount)?;
    }
    if let Some(phone) = &changes.agent_phone {
        validators::validate_phone(phone)?;
    }

    let updated = state.commission_repo.update(&commission_id, &changes).await?;
    info!("Commission updated: {}", updated.id);
    Ok(ApiResponse::ok(updated))
}

pub async fn pay_commission(
    State(state): State<Arc<AppState>>,
    Path(commission_id): Path<String>,
    payload: Option<Json<PayCommissionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let (paid_date, payment_reference) = match payload {
        Some(Json(body)) => (
            body.paid_date.unwrap_or_else(|| Utc::now().date_naive()),
            body.payment_reference,
        ),
        None => (Utc::now().date_naive(), None),
    };

    let paid = state.commission_repo.mark_paid(&commission_id, paid_date, payment_reference).await?;
    info!("Commission paid: {} on {}", paid.id, paid_date);
    Ok(ApiResponse::with_message(paid, "Commission marked as paid"))
}

pub async fn cancel_commission(
    State(state): State<Arc<AppState>>,
    Path(commission_id): Path<String>,
    payload: Option<Json<CancelCommissionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|Json(body)| body.reason);

    let cancelled = state.commission_repo.cancel(&commission_id, reason).await?;
    info!("Commission cancelled: {}", cancelled.id);
    Ok(ApiResponse::with_message(cancelled, "Commission cancelled"))
}
