mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_property_and_unit_directory() {
    let app = TestApp::new().await;

    // Create property
    let res = app.post_json("/api/v1/properties", json!({
        "name": "Sunrise Apartments",
        "address": "12 Harbor Road"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    let property_id = body["data"]["id"].as_str().unwrap().to_string();

    // Fetch it back
    let res = app.get(&format!("/api/v1/properties/{}", property_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["name"], "Sunrise Apartments");

    // Add two units
    for unit_number in ["A-1", "A-2"] {
        let res = app.post_json(
            &format!("/api/v1/properties/{}/units", property_id),
            json!({ "unit_number": unit_number, "monthly_rent_cents": 45000 }),
        ).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = parse_body(res).await;
        assert_eq!(body["data"]["is_occupied"], false);
    }

    // List units
    let res = app.get(&format!("/api/v1/properties/{}/units", property_id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // List properties
    let res = app.get("/api/v1/properties").await;
    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_property_validation_and_missing_lookups() {
    let app = TestApp::new().await;

    // Blank name rejected
    let res = app.post_json("/api/v1/properties", json!({
        "name": "   ",
        "address": "Nowhere"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown property
    let res = app.get("/api/v1/properties/nope").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unit under unknown property
    let res = app.post_json("/api/v1/properties/nope/units", json!({
        "unit_number": "B-1"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Negative rent rejected
    let (property_id, _) = app.seed_property_with_unit().await;
    let res = app.post_json(
        &format!("/api/v1/properties/{}/units", property_id),
        json!({ "unit_number": "B-2", "monthly_rent_cents": -100 }),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
