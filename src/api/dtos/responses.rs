use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::payment_plan::PlanStatus;

/// Uniform response envelope: `{ success, data?, message? }` on the happy
/// path; errors produce `{ success: false, error }` via AppError.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        })
    }
}

#[derive(Serialize)]
pub struct InstallmentResponse {
    pub plan_id: String,
    pub receipt_number: String,
    pub new_amount_paid_cents: i64,
    pub new_balance_cents: i64,
    pub status: PlanStatus,
    pub next_due_date: Option<NaiveDate>,
}
