use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateTenantRequest;
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::tenant::{NewTenantParams, Tenant};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    validators::validate_phone(&payload.phone)?;
    validators::validate_email(&payload.email)?;
    let deposit = payload.deposit_cents.unwrap_or(0);
    validators::validate_non_negative("deposit_cents", deposit)?;

    // Pre-check for a friendlier message; the partial unique indexes on
    // active tenants are the backstop.
    if state.tenant_repo.find_active_by_contact(&payload.phone, &payload.email).await?.is_some() {
        return Err(AppError::Conflict("A tenant with this phone or email already exists".into()));
    }

    let tenant = Tenant::new(NewTenantParams {
        unit_id: payload.unit_id,
        full_name: payload.full_name,
        phone: payload.phone,
        email: payload.email,
        id_number: payload.id_number,
        deposit_cents: deposit,
        move_in_date: payload.move_in_date.unwrap_or_else(|| Utc::now().date_naive()),
    });

    let created = state.tenant_repo.create_in_unit(&tenant).await?;
    info!("Tenant registered: {} in unit {}", created.id, created.unit_id);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_tenant(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_id(&tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;
    Ok(ApiResponse::ok(tenant))
}

pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = state.tenant_repo.list().await?;
    Ok(ApiResponse::ok(tenants))
}

pub async fn delete_tenant(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.deactivate(&tenant_id, Utc::now().date_naive()).await?;
    info!("Tenant moved out: {} (unit {} released)", tenant.id, tenant.unit_id);
    Ok(ApiResponse::with_message(tenant, "Tenant moved out"))
}
