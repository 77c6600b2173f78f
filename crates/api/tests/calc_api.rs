//! Integration tests for the stateless calculator endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

#[tokio::test]
async fn converts_inches_to_cm() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/convert",
        json!({ "value": 10.0, "from": "inch", "to": "cm" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let value = json["data"]["value"].as_f64().unwrap();
    assert!((value - 25.4).abs() < 1e-9);
    assert_eq!(json["data"]["units"], "cm");
}

#[tokio::test]
async fn missing_value_converts_as_zero() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/convert",
        json!({ "from": "m3", "to": "tons" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn incompatible_units_are_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/convert",
        json!({ "value": 1.0, "from": "inch", "to": "tons" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Cannot convert inch to tons");
}

#[tokio::test]
async fn slab_metrics_apply_trim_and_allowances() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/slab",
        json!({
            "length": 120.0,
            "height": 60.0,
            "trim": { "length": 4.0, "height": 2.0 }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["adjusted_length"].as_f64().unwrap(), 118.0);
    assert_eq!(data["adjusted_height"].as_f64().unwrap(), 58.0);
    assert_eq!(data["square_feet"].as_f64().unwrap(), 47.53);
    assert_eq!(data["amount"].as_f64().unwrap(), 522.81);
}

#[tokio::test]
async fn block_metrics_default_to_centimetres() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/block",
        json!({ "length": 200.0, "breadth": 100.0, "height": 150.0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["volume_m3"].as_f64().unwrap(), 3.0);
    assert_eq!(data["weight_tons"].as_f64().unwrap(), 10.5);
}

#[tokio::test]
async fn block_without_breadth_has_zero_volume() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/block",
        json!({ "length": 200.0, "height": 150.0 }),
    )
    .await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["volume_m3"].as_f64().unwrap(), 0.0);
    assert_eq!(data["weight_tons"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn unknown_unit_is_a_client_error() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/calc/convert",
        json!({ "value": 1.0, "from": "furlong", "to": "cm" }),
    )
    .await;

    assert!(response.status().is_client_error());
}
