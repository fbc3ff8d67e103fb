pub mod sqlite_property_repo;
pub mod sqlite_tenant_repo;
pub mod sqlite_payment_plan_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_commission_repo;
pub mod sqlite_utility_repo;
pub mod sqlite_notification_repo;

pub mod postgres_property_repo;
pub mod postgres_tenant_repo;
pub mod postgres_payment_plan_repo;
pub mod postgres_payment_repo;
pub mod postgres_commission_repo;
pub mod postgres_utility_repo;
pub mod postgres_notification_repo;
