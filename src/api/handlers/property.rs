use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreatePropertyRequest, CreateUnitRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::property::{Property, Unit};
use crate::domain::services::validators;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_property(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }

    let created = state.property_repo.create(&Property::new(payload.name, payload.address)).await?;
    info!("Property created: {}", created.id);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Property not found".into()))?;
    Ok(ApiResponse::ok(property))
}

pub async fn list_properties(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let properties = state.property_repo.list().await?;
    Ok(ApiResponse::ok(properties))
}

pub async fn create_unit(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
    Json(payload): Json<CreateUnitRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Property not found".into()))?;

    if payload.unit_number.trim().is_empty() {
        return Err(AppError::Validation("unit_number is required".into()));
    }
    let rent = payload.monthly_rent_cents.unwrap_or(0);
    validators::validate_non_negative("monthly_rent_cents", rent)?;

    let created = state.property_repo
        .create_unit(&Unit::new(property_id, payload.unit_number, rent))
        .await?;
    info!("Unit created: {} ({})", created.id, created.unit_number);
    Ok((StatusCode::CREATED, ApiResponse::ok(created)))
}

pub async fn list_units(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.property_repo.find_by_id(&property_id).await?
        .ok_or(AppError::NotFound("Property not found".into()))?;

    let units = state.property_repo.list_units(&property_id).await?;
    Ok(ApiResponse::ok(units))
}
