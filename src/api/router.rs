use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, property, tenant, payment_plan, payment, commission, utility, notification};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Properties & Units
        .route("/api/v1/properties", post(property::create_property).get(property::list_properties))
        .route("/api/v1/properties/{property_id}", get(property::get_property))
        .route("/api/v1/properties/{property_id}/units", post(property::create_unit).get(property::list_units))

        // Tenants
        .route("/api/v1/tenants", post(tenant::create_tenant).get(tenant::list_tenants))
        .route("/api/v1/tenants/{tenant_id}", get(tenant::get_tenant).delete(tenant::delete_tenant))
        .route("/api/v1/tenants/{tenant_id}/payment-plans", get(payment_plan::list_plans_for_tenant))

        // Payment Plans
        .route("/api/v1/payment-plans", post(payment_plan::create_plan))
        .route("/api/v1/payment-plans/{plan_id}", get(payment_plan::get_plan))
        .route("/api/v1/payment-plans/{plan_id}/pay", put(payment_plan::record_installment))

        // Payments
        .route("/api/v1/payments", post(payment::create_payment).get(payment::list_payments))
        .route("/api/v1/payments/{payment_id}", get(payment::get_payment).delete(payment::cancel_payment))

        // Agent Commissions
        .route("/api/v1/commissions", post(commission::create_commission).get(commission::list_commissions))
        .route("/api/v1/commissions/{commission_id}", get(commission::get_commission).put(commission::update_commission).delete(commission::cancel_commission))
        .route("/api/v1/commissions/{commission_id}/pay", put(commission::pay_commission))

        // Utilities
        .route("/api/v1/utilities", post(utility::create_utility).get(utility::list_utilities))
        .route("/api/v1/utilities/{utility_id}", get(utility::get_utility))
        .route("/api/v1/utilities/{utility_id}/pay", put(utility::pay_utility))

        // Notifications
        .route("/api/v1/notifications", post(notification::send_notification).get(notification::list_notifications))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
