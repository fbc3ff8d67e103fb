mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

async fn seed_plan(app: &TestApp, tenant_id: &str, total: i64, installment: i64, frequency: &str) -> String {
    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": tenant_id,
        "total_amount_cents": total,
        "installment_amount_cents": installment,
        "installment_frequency": frequency,
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_plan_creation_defaults() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;

    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": tenant_id,
        "total_amount_cents": 120000,
        "installment_amount_cents": 30000,
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    let plan = &body["data"];
    assert_eq!(plan["status"], "active");
    assert_eq!(plan["installment_frequency"], "monthly");
    assert_eq!(plan["amount_paid_cents"], 0);
    assert_eq!(plan["balance_cents"], 120000);
    // First due date is one frequency step after the start
    assert_eq!(plan["next_due_date"], "2025-02-15");
}

#[tokio::test]
async fn test_partial_installment_keeps_plan_active() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;
    let plan_id = seed_plan(&app, &tenant_id, 120000, 30000, "monthly").await;

    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 30000,
        "payment_date": "2025-02-10",
        "payment_method": "mpesa"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let data = &body["data"];
    assert_eq!(data["new_amount_paid_cents"], 30000);
    assert_eq!(data["new_balance_cents"], 90000);
    assert_eq!(data["status"], "active");
    assert_eq!(data["next_due_date"], "2025-03-10");
    assert!(data["receipt_number"].as_str().unwrap().starts_with("RCP-"));

    // The installment shows up as a tagged payment for the tenant
    let res = app.get(&format!("/api/v1/payments?tenant_id={}", tenant_id)).await;
    let body = parse_body(res).await;
    let payments = body["data"].as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["plan_id"].as_str().unwrap(), plan_id);
    assert_eq!(payments[0]["amount_cents"], 30000);
}

#[tokio::test]
async fn test_final_installment_completes_plan() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;
    let plan_id = seed_plan(&app, &tenant_id, 60000, 30000, "weekly").await;

    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 30000,
        "payment_date": "2025-01-22"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["next_due_date"], "2025-01-29");

    // Paying at least the remaining balance completes the plan
    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 30000,
        "payment_date": "2025-01-29"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["new_balance_cents"], 0);
    assert!(body["data"]["next_due_date"].is_null());

    // No further installments accepted
    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 10000
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overpayment_completes_plan_with_negative_balance() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;
    let plan_id = seed_plan(&app, &tenant_id, 50000, 20000, "monthly").await;

    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 70000
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["new_amount_paid_cents"], 70000);
    // Balance stays total - paid, so overpayment shows as a negative balance
    assert_eq!(body["data"]["new_balance_cents"], -20000);
}

#[tokio::test]
async fn test_overpaid_final_installment_keeps_balance_arithmetic() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;
    let plan_id = seed_plan(&app, &tenant_id, 10000, 2000, "monthly").await;

    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 6000
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["new_balance_cents"], 4000);
    assert_eq!(body["data"]["status"], "active");

    // 5000 against a 4000 balance: completed, balance -1000
    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": 5000
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["new_amount_paid_cents"], 11000);
    assert_eq!(body["data"]["new_balance_cents"], -1000);
    assert!(body["data"]["next_due_date"].is_null());

    // The stored plan reflects the same arithmetic
    let res = app.get(&format!("/api/v1/payment-plans/{}", plan_id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["balance_cents"], -1000);
}

#[tokio::test]
async fn test_plan_validation_and_lookups() {
    let app = TestApp::new().await;
    let (_, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;

    // Zero amount
    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": tenant_id,
        "total_amount_cents": 0,
        "installment_amount_cents": 0,
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Installment exceeding total
    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": tenant_id,
        "total_amount_cents": 10000,
        "installment_amount_cents": 20000,
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown frequency
    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": tenant_id,
        "total_amount_cents": 10000,
        "installment_amount_cents": 5000,
        "installment_frequency": "hourly",
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown tenant
    let res = app.post_json("/api/v1/payment-plans", json!({
        "tenant_id": "missing",
        "total_amount_cents": 10000,
        "installment_amount_cents": 5000,
        "start_date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Pay against unknown plan
    let res = app.put_json("/api/v1/payment-plans/missing/pay", json!({
        "amount_cents": 1000
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Non-positive installment amount
    let plan_id = seed_plan(&app, &tenant_id, 10000, 5000, "monthly").await;
    let res = app.put_json(&format!("/api/v1/payment-plans/{}/pay", plan_id), json!({
        "amount_cents": -5
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Listing per tenant
    let res = app.get(&format!("/api/v1/tenants/{}/payment-plans", tenant_id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
