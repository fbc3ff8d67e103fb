use std::sync::Arc;
use crate::domain::ports::{
    PropertyRepository, TenantRepository, PaymentPlanRepository, PaymentRepository,
    CommissionRepository, UtilityRepository, NotificationRepository, SmsGateway,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub plan_repo: Arc<dyn PaymentPlanRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub commission_repo: Arc<dyn CommissionRepository>,
    pub utility_repo: Arc<dyn UtilityRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub sms_gateway: Arc<dyn SmsGateway>,
}
