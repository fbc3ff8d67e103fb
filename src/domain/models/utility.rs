use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UtilityPaymentStatus {
    Pending,
    Partial,
    Paid,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct UtilityBill {
    pub id: String,
    pub unit_id: String,
    pub tenant_id: Option<String>,
    pub utility_type: String,
    pub billing_month: String,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub units_consumed: i64,
    pub rate_per_unit_cents: i64,
    pub amount_due_cents: i64,
    pub amount_paid_cents: i64,
    pub payment_status: UtilityPaymentStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUtilityBillParams {
    pub unit_id: String,
    pub tenant_id: Option<String>,
    pub utility_type: String,
    pub billing_month: String,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub rate_per_unit_cents: i64,
    pub due_date: Option<NaiveDate>,
}

impl UtilityBill {
    /// Consumption and amount due are derived once, on write.
    pub fn new(params: NewUtilityBillParams) -> Self {
        let units_consumed = params.current_reading - params.previous_reading;
        let amount_due_cents = units_consumed * params.rate_per_unit_cents;

        Self {
            id: Uuid::new_v4().to_string(),
            unit_id: params.unit_id,
            tenant_id: params.tenant_id,
            utility_type: params.utility_type,
            billing_month: params.billing_month,
            previous_reading: params.previous_reading,
            current_reading: params.current_reading,
            units_consumed,
            rate_per_unit_cents: params.rate_per_unit_cents,
            amount_due_cents,
            amount_paid_cents: 0,
            payment_status: UtilityPaymentStatus::Pending,
            due_date: params.due_date,
            created_at: Utc::now(),
        }
    }

    pub fn derive_status(amount_paid_cents: i64, amount_due_cents: i64) -> UtilityPaymentStatus {
        if amount_paid_cents >= amount_due_cents {
            UtilityPaymentStatus::Paid
        } else if amount_paid_cents > 0 {
            UtilityPaymentStatus::Partial
        } else {
            UtilityPaymentStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields_on_create() {
        let bill = UtilityBill::new(NewUtilityBillParams {
            unit_id: "u1".to_string(),
            tenant_id: None,
            utility_type: "water".to_string(),
            billing_month: "2025-03".to_string(),
            previous_reading: 120,
            current_reading: 150,
            rate_per_unit_cents: 250,
            due_date: None,
        });

        assert_eq!(bill.units_consumed, 30);
        assert_eq!(bill.amount_due_cents, 7500);
        assert_eq!(bill.payment_status, UtilityPaymentStatus::Pending);
    }

    #[test]
    fn test_payment_status_derivation() {
        assert_eq!(UtilityBill::derive_status(0, 5000), UtilityPaymentStatus::Pending);
        assert_eq!(UtilityBill::derive_status(2000, 5000), UtilityPaymentStatus::Partial);
        assert_eq!(UtilityBill::derive_status(5000, 5000), UtilityPaymentStatus::Paid);
        assert_eq!(UtilityBill::derive_status(6000, 5000), UtilityPaymentStatus::Paid);
    }
}
