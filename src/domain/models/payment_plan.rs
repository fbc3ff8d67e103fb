use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::domain::models::payment::Payment;
use crate::domain::services::schedule;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InstallmentFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
}

impl InstallmentFrequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PaymentPlan {
    pub id: String,
    pub tenant_id: String,
    pub total_amount_cents: i64,
    pub amount_paid_cents: i64,
    pub balance_cents: i64,
    pub installment_amount_cents: i64,
    pub installment_frequency: InstallmentFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewPlanParams {
    pub tenant_id: String,
    pub total_amount_cents: i64,
    pub installment_amount_cents: i64,
    pub installment_frequency: InstallmentFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PaymentPlan {
    pub fn new(params: NewPlanParams) -> Self {
        let next_due_date = schedule::advance(params.start_date, params.installment_frequency);

        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            total_amount_cents: params.total_amount_cents,
            amount_paid_cents: 0,
            balance_cents: params.total_amount_cents,
            installment_amount_cents: params.installment_amount_cents,
            installment_frequency: params.installment_frequency,
            start_date: params.start_date,
            end_date: params.end_date,
            next_due_date: Some(next_due_date),
            status: PlanStatus::Active,
            created_at: Utc::now(),
        }
    }
}

pub struct NewInstallment {
    pub amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    pub reference_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InstallmentReceipt {
    pub plan: PaymentPlan,
    pub payment: Payment,
}
