use crate::domain::models::{
    commission::{Commission, CommissionChanges},
    notification::{NotificationChannel, NotificationLog},
    payment::Payment,
    payment_plan::{InstallmentReceipt, NewInstallment, PaymentPlan},
    property::{Property, Unit},
    tenant::Tenant,
    utility::UtilityBill,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &Property) -> Result<Property, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError>;
    async fn list(&self) -> Result<Vec<Property>, AppError>;
    async fn create_unit(&self, unit: &Unit) -> Result<Unit, AppError>;
    async fn find_unit(&self, id: &str) -> Result<Option<Unit>, AppError>;
    async fn list_units(&self, property_id: &str) -> Result<Vec<Unit>, AppError>;
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Creates the tenant and flips the unit's occupancy flag in one
    /// transaction. Fails with Conflict if the unit is already occupied.
    async fn create_in_unit(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_active_by_contact(&self, phone: &str, email: &str) -> Result<Option<Tenant>, AppError>;
    async fn list(&self) -> Result<Vec<Tenant>, AppError>;
    /// Soft delete: marks the tenant former, sets the move-out date, and
    /// releases the unit in the same transaction.
    async fn deactivate(&self, id: &str, move_out_date: NaiveDate) -> Result<Tenant, AppError>;
}

#[async_trait]
pub trait PaymentPlanRepository: Send + Sync {
    async fn create(&self, plan: &PaymentPlan) -> Result<PaymentPlan, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<PaymentPlan>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<PaymentPlan>, AppError>;
    /// Applies an installment: updates amount_paid/balance/status/next_due_date
    /// and inserts the tagged payment row, all in one transaction. Concurrent
    /// calls against the same plan serialize; no update is lost.
    async fn record_installment(&self, plan_id: &str, installment: &NewInstallment) -> Result<InstallmentReceipt, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>, AppError>;
    async fn list(&self) -> Result<Vec<Payment>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Payment>, AppError>;
    /// Status transition to cancelled; the row is never removed.
    async fn cancel(&self, id: &str) -> Result<Payment, AppError>;
}

#[async_trait]
pub trait CommissionRepository: Send + Sync {
    /// Verifies the property exists and, when a tenant is attached, that the
    /// tenant occupies a unit of the same property (checked in-transaction).
    async fn create(&self, commission: &Commission) -> Result<Commission, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Commission>, AppError>;
    async fn list(&self) -> Result<Vec<Commission>, AppError>;
    async fn update(&self, id: &str, changes: &CommissionChanges) -> Result<Commission, AppError>;
    async fn mark_paid(&self, id: &str, paid_date: NaiveDate, payment_reference: Option<String>) -> Result<Commission, AppError>;
    async fn cancel(&self, id: &str, reason: Option<String>) -> Result<Commission, AppError>;
}

#[async_trait]
pub trait UtilityRepository: Send + Sync {
    async fn create(&self, bill: &UtilityBill) -> Result<UtilityBill, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<UtilityBill>, AppError>;
    async fn list_by_unit(&self, unit_id: &str) -> Result<Vec<UtilityBill>, AppError>;
    async fn list(&self) -> Result<Vec<UtilityBill>, AppError>;
    /// Increments amount_paid and re-derives payment_status transactionally.
    async fn record_payment(&self, id: &str, amount_cents: i64) -> Result<UtilityBill, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn log(&self, entry: &NotificationLog) -> Result<NotificationLog, AppError>;
    async fn list(&self) -> Result<Vec<NotificationLog>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<NotificationLog>, AppError>;
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, recipient: &str, channel: NotificationChannel, message: &str) -> Result<(), AppError>;
}
