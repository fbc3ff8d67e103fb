use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use crate::state::AppState;
use crate::api::dtos::requests::CreatePaymentRequest;
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::payment::{NewPaymentParams, Payment};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

#[derive(Deserialize)]
pub struct PaymentListQuery {
    pub tenant_id: Option<String>,
}

pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_positive_amount("amount_cents", payload.amount_cents)?;
    if payload.payment_method.trim().is_empty() {
        return Err(AppError::Validation("payment_method is required".into()));
    }

    state.tenant_repo.find_by_id(&payload.tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    let payment = Payment::new(NewPaymentParams {
        tenant_id: payload.tenant_id,
        property_id: payload.property_id,
        unit_id: payload.unit_id,
        plan_id: None,
        amount_cents: payload.amount_cents,
        payment_date: payload.payment_date.unwrap_or_else(|| Utc::now().date_naive()),
        payment_month: payload.payment_month,
        payment_method: payload.payment_method,
        reference_number: payload.reference_number,
    });

    let created = state.payment_repo.create(&payment).await?;
    info!("Payment recorded: {} ({})", created.id, created.receipt_number);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payment_repo.find_by_id(&payment_id).await?
        .ok_or(AppError::NotFound("Payment not found".into()))?;
    Ok(ApiResponse::ok(payment))
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaymentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payments = match query.tenant_id {
        Some(tenant_id) => state.payment_repo.list_by_tenant(&tenant_id).await?,
        None => state.payment_repo.list().await?,
    };
    Ok(ApiResponse::ok(payments))
}

pub async fn cancel_payment(
    State(state): State<Arc<AppState>>,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.payment_repo.cancel(&payment_id).await?;
    info!("Payment cancelled: {}", cancelled.id);
    Ok(ApiResponse::with_message(cancelled, "Payment cancelled"))
}
