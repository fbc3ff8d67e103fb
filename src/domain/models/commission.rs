use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Commission {
    pub id: String,
    pub agent_name: String,
    pub agent_phone: Option<String>,
    pub property_id: String,
    pub tenant_id: Option<String>,
    pub commission_amount_cents: i64,
    pub status: CommissionStatus,
    pub paid_date: Option<NaiveDate>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewCommissionParams {
    pub agent_name: String,
    pub agent_phone: Option<String>,
    pub property_id: String,
    pub tenant_id: Option<String>,
    pub commission_amount_cents: i64,
    pub notes: Option<String>,
}

impl Commission {
    pub fn new(params: NewCommissionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            agent_name: params.agent_name,
            agent_phone: params.agent_phone,
            property_id: params.property_id,
            tenant_id: params.tenant_id,
            commission_amount_cents: params.commission_amount_cents,
            status: CommissionStatus::Pending,
            paid_date: None,
            payment_reference: None,
            notes: params.notes,
            created_at: Utc::now(),
        }
    }
}

/// Whitelisted updatable columns. Anything outside this set never reaches SQL.
/// Partial update; `None` leaves a column unchanged, so nullable fields
/// (`agent_phone`, `notes`) cannot be cleared back to NULL through here.
#[derive(Debug, Default, Deserialize)]
pub struct CommissionChanges {
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
    pub commission_amount_cents: Option<i64>,
    pub notes: Option<String>,
}

impl CommissionChanges {
    /// True when any field other than notes would change.
    pub fn touches_locked_fields(&self) -> bool {
        self.agent_name.is_some()
            || self.agent_phone.is_some()
            || self.commission_amount_cents.is_some()
    }
}
