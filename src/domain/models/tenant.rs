use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Former,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub unit_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub id_number: Option<String>,
    pub deposit_cents: i64,
    pub status: TenantStatus,
    pub move_in_date: NaiveDate,
    pub move_out_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

pub struct NewTenantParams {
    pub unit_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub id_number: Option<String>,
    pub deposit_cents: i64,
    pub move_in_date: NaiveDate,
}

impl Tenant {
    pub fn new(params: NewTenantParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            unit_id: params.unit_id,
            full_name: params.full_name,
            phone: params.phone,
            email: params.email,
            id_number: params.id_number,
            deposit_cents: params.deposit_cents,
            status: TenantStatus::Active,
            move_in_date: params.move_in_date,
            move_out_date: None,
            created_at: Utc::now(),
        }
    }
}
