pub mod commission;
pub mod notification;
pub mod payment;
pub mod payment_plan;
pub mod property;
pub mod tenant;
pub mod utility;
