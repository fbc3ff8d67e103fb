use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use crate::state::AppState;
use crate::api::dtos::requests::{CreateUtilityRequest, PayUtilityRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::utility::{NewUtilityBillParams, UtilityBill};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct UtilityListQuery {
    pub unit_id: Option<String>,
}

pub async fn create_utility(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUtilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.utility_type.trim().is_empty() {
        return Err(AppError::Validation("utility_type is required".into()));
    }
    validators::validate_billing_month(&payload.billing_month)?;
    validators::validate_non_negative("previous_reading", payload.previous_reading)?;
    if payload.current_reading < payload.previous_reading {
        return Err(AppError::Validation(
            "current_reading cannot be lower than previous_reading".into(),
        ));
    }
    validators::validate_positive_amount("rate_per_unit_cents", payload.rate_per_unit_cents)?;

    state.property_repo.find_unit(&payload.unit_id).await?
        .ok_or(AppError::NotFound("Unit not found".into()))?;

    let bill = UtilityBill::new(NewUtilityBillParams {
        unit_id: payload.unit_id,
        tenant_id: payload.tenant_id,
        utility_type: payload.utility_type,
        billing_month: payload.billing_month,
        previous_reading: payload.previous_reading,
        current_reading: payload.current_reading,
        rate_per_unit_cents: payload.rate_per_unit_cents,
        due_date: payload.due_date,
    });

    let created = state.utility_repo.create(&bill).await?;
    info!(
        "Utility bill created: {} ({} {}, due {})",
        created.id, created.utility_type, created.billing_month, created.amount_due_cents
    );
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_utility(
    State(state): State<Arc<AppState>>,
    Path(utility_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bill = state.utility_repo.find_by_id(&utility_id).await?
        .ok_or(AppError::NotFound("Utility bill not found".into()))?;
    Ok(ApiResponse::ok(bill))
}

pub async fn list_utilities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UtilityListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bills = match query.unit_id {
        Some(unit_id) => state.utility_repo.list_by_unit(&unit_id).await?,
        None => state.utility_repo.list().await?,
    };
    Ok(ApiResponse::ok(bills))
}

pub async fn pay_utility(
    State(state): State<Arc<AppState>>,
    Path(utility_id): Path<String>,
    Json(payload): Json<PayUtilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_positive_amount("amount_cents", payload.amount_cents)?;

    let bill = state.utility_repo.record_payment(&utility_id, payload.amount_cents).await?;
    info!(
        "Utility payment recorded: {} paid {} (now {:?})",
        bill.id, payload.amount_cents, bill.payment_status
    );
    Ok(ApiResponse::ok(bill))
}
