use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct CreateUnitRequest {
    pub unit_number: String,
    pub monthly_rent_cents: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub unit_id: String,
    pub id_number: Option<String>,
    pub deposit_cents: Option<i64>,
    pub move_in_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreatePaymentPlanRequest {
    pub tenant_id: String,
    pub total_amount_cents: i64,
    pub installment_amount_cents: i64,
    pub installment_frequency: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct RecordInstallmentRequest {
    pub amount_cents: i64,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub reference_number: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub tenant_id: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub payment_date: Option<NaiveDate>,
    pub payment_month: Option<String>,
    pub property_id: Option<String>,
    pub unit_id: Option<String>,
    pub reference_number: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCommissionRequest {
    pub agent_name: String,
    pub agent_phone: Option<String>,
    pub property_id: String,
    pub tenant_id: Option<String>,
    pub commission_amount_cents: i64,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct PayCommissionRequest {
    pub paid_date: Option<NaiveDate>,
    pub payment_reference: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelCommissionRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUtilityRequest {
    pub unit_id: String,
    pub tenant_id: Option<String>,
    pub utility_type: String,
    pub billing_month: String,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub rate_per_unit_cents: i64,
    pub due_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PayUtilityRequest {
    pub amount_cents: i64,
}

#[derive(Deserialize)]
pub struct SendNotificationRequest {
    pub tenant_id: Option<String>,
    pub recipient_phone: String,
    pub channel: Option<String>,
    pub message: String,
}
