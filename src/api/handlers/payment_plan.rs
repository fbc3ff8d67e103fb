use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreatePaymentPlanRequest, RecordInstallmentRequest};
use crate::api::dtos::responses::{ApiResponse, InstallmentResponse};
use crate::domain::models::payment_plan::{InstallmentFrequency, NewInstallment, NewPlanParams, PaymentPlan};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePaymentPlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_positive_amount("total_amount_cents", payload.total_amount_cents)?;
    validators::validate_positive_amount("installment_amount_cents", payload.installment_amount_cents)?;
    if payload.installment_amount_cents > payload.total_amount_cents {
        return Err(AppError::Validation("installment_amount_cents cannot exceed total_amount_cents".into()));
    }

    let frequency = match payload.installment_frequency.as_deref() {
        None => InstallmentFrequency::Monthly,
        Some(value) => InstallmentFrequency::parse(value)
            .ok_or_else(|| AppError::Validation(format!("Invalid installment_frequency: {}", value)))?,
    };

    state.tenant_repo.find_by_id(&payload.tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    let plan = PaymentPlan::new(NewPlanParams {
        tenant_id: payload.tenant_id,
        total_amount_cents: payload.total_amount_cents,
        installment_amount_cents: payload.installment_amount_cents,
        installment_frequency: frequency,
        start_date: payload.start_date,
        end_date: payload.end_date,
    });

    let created = state.plan_repo.create(&plan).await?;
    info!("Payment plan created: {} for tenant {}", created.id, created.tenant_id);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = state.plan_repo.find_by_id(&plan_id).await?
        .ok_or(AppError::NotFound("Payment plan not found".into()))?;
    Ok(ApiResponse::ok(plan))
}

pub async fn list_plans_for_tenant(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.tenant_repo.find_by_id(&tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    let plans = state.plan_repo.list_by_tenant(&tenant_id).await?;
    Ok(ApiResponse::ok(plans))
}

pub async fn record_installment(
    State(state): State<Arc<AppState>>,
    Path(plan_id): Path<String>,
    Json(payload): Json<RecordInstallmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_positive_amount("amount_cents", payload.amount_cents)?;

    let installment = NewInstallment {
        amount_cents: payload.amount_cents,
        payment_date: payload.payment_date.unwrap_or_else(|| Utc::now().date_naive()),
        payment_method: payload.payment_method.unwrap_or_else(|| "cash".to_string()),
        reference_number: payload.reference_number,
    };

    let receipt = state.plan_repo.record_installment(&plan_id, &installment).await?;
    info!(
        "Installment recorded: plan {} paid {} (balance {})",
        receipt.plan.id, installment.amount_cents, receipt.plan.balance_cents
    );

    Ok(ApiResponse::ok(InstallmentResponse {
        plan_id: receipt.plan.id,
        receipt_number: receipt.payment.receipt_number,
        new_amount_paid_cents: receipt.plan.amount_paid_cents,
        new_balance_cents: receipt.plan.balance_cents,
        status: receipt.plan.status,
        next_due_date: receipt.plan.next_due_date,
    }))
}
