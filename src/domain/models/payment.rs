use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub property_id: Option<String>,
    pub unit_id: Option<String>,
    pub plan_id: Option<String>,
    pub amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_month: Option<String>,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub receipt_number: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewPaymentParams {
    pub tenant_id: String,
    pub property_id: Option<String>,
    pub unit_id: Option<String>,
    pub plan_id: Option<String>,
    pub amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_month: Option<String>,
    pub payment_method: String,
    pub reference_number: Option<String>,
}

impl Payment {
    pub fn new(params: NewPaymentParams) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            property_id: params.property_id,
            unit_id: params.unit_id,
            plan_id: params.plan_id,
            amount_cents: params.amount_cents,
            payment_date: params.payment_date,
            // 7-character year-month token, e.g. "2025-01"
            payment_month: params.payment_month.map(|m| m.chars().take(7).collect()),
            payment_method: params.payment_method,
            reference_number: params.reference_number,
            receipt_number: format!("RCP-{}", token.to_uppercase()),
            status: PaymentStatus::Completed,
            created_at: Utc::now(),
        }
    }
}
