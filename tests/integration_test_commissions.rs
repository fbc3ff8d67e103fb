mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn seed_commission(app: &TestApp, property_id: &str, tenant_id: Option<&str>) -> String {
    let res = app.post_json("/api/v1/commissions", json!({
        "agent_name": "Joseph Kamau",
        "agent_phone": "+254711000111",
        "property_id": property_id,
        "tenant_id": tenant_id,
        "commission_amount_cents": 25000,
        "notes": "Referral for unit A-1"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_commission_lifecycle() {
    let app = TestApp::new().await;
    let (property_id, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;
    let commission_id = seed_commission(&app, &property_id, Some(&tenant_id)).await;

    let res = app.get(&format!("/api/v1/commissions/{}", commission_id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["paid_date"].is_null());

    // Edit while pending
    let res = app.put_json(&format!("/api/v1/commissions/{}", commission_id), json!({
        "commission_amount_cents": 30000
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["commission_amount_cents"], 30000);
    // Untouched fields survive a partial update
    assert_eq!(body["data"]["agent_name"], "Joseph Kamau");

    // Mark paid
    let res = app.put_json(&format!("/api/v1/commissions/{}/pay", commission_id), json!({
        "paid_date": "2025-02-01",
        "payment_reference": "CHQ-0042"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["paid_date"], "2025-02-01");
    assert_eq!(body["data"]["payment_reference"], "CHQ-0042");

    // Paying twice is a conflict
    let res = app.put_json(&format!("/api/v1/commissions/{}/pay", commission_id), json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Paid commissions only accept note edits
    let res = app.put_json(&format!("/api/v1/commissions/{}", commission_id), json!({
        "commission_amount_cents": 99999
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.put_json(&format!("/api/v1/commissions/{}", commission_id), json!({
        "notes": "Settled by cheque"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["notes"], "Settled by cheque");
}

#[tokio::test]
async fn test_commission_cancellation() {
    let app = TestApp::new().await;
    let (property_id, _) = app.seed_property_with_unit().await;
    let commission_id = seed_commission(&app, &property_id, None).await;

    let res = app.router.clone().oneshot(
        axum::http::Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/commissions/{}", commission_id))
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from(json!({"reason": "Agent withdrew"}).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "cancelled");
    let notes = body["data"]["notes"].as_str().unwrap();
    assert!(notes.contains("Agent withdrew"));

    // A paid commission cannot be cancelled
    let second = seed_commission(&app, &property_id, None).await;
    let res = app.put_json(&format!("/api/v1/commissions/{}/pay", second), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.delete(&format!("/api/v1/commissions/{}", second)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_commission_referential_checks() {
    let app = TestApp::new().await;
    let (property_id, unit_id) = app.seed_property_with_unit().await;
    let tenant_id = app.seed_tenant(&unit_id, "+254700111222", "amina@example.com").await;

    // Unknown property
    let res = app.post_json("/api/v1/commissions", json!({
        "agent_name": "Joseph Kamau",
        "property_id": "missing",
        "commission_amount_cents": 25000
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Tenant attached to a different property
    let res = app.post_json("/api/v1/properties", json!({
        "name": "Other Towers", "address": "9 Side Street"
    })).await;
    let other_property = parse_body(res).await["data"]["id"].as_str().unwrap().to_string();

    let res = app.post_json("/api/v1/commissions", json!({
        "agent_name": "Joseph Kamau",
        "property_id": other_property,
        "tenant_id": tenant_id,
        "commission_amount_cents": 25000
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Matching property passes
    let res = app.post_json("/api/v1/commissions", json!({
        "agent_name": "Joseph Kamau",
        "property_id": property_id,
        "tenant_id": tenant_id,
        "commission_amount_cents": 25000
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}
