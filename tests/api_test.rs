mod common;

use std::str::FromStr;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::TestApp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

/// Prices serialize as JSON strings; parse through Decimal so scale
/// differences ("2.5" vs "2.50") do not matter.
fn decimal_field(value: &serde_json::Value, field: &str) -> Decimal {
    Decimal::from_str(value[field].as_str().expect("expected a decimal string"))
        .expect("expected a parseable decimal")
}

#[tokio::test]
async fn product_crud_and_movement_flow() {
    let app = TestApp::new().await;

    // Create: the SKU comes back normalized
    let (status, body) = app
        .post(
            "/api/v1/products",
            json!({"name": "Widget", "sku": " wd-1 ", "quantity": 10, "price": "2.50"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sku"], "WD-1");
    assert_eq!(body["quantity"], 10);
    let product_id = body["id"].as_str().unwrap().to_string();

    // Purchase 5 with a note
    let (status, body) = app
        .post(
            &format!("/api/v1/products/{}/purchase", product_id),
            json!({"amount": 5, "note": "restock order #42"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["previous_quantity"], 10);
    assert_eq!(body["new_quantity"], 15);
    assert_eq!(decimal_field(&body, "price"), dec!(2.50));

    // Overselling is a field-level rejection, not a server failure
    let (status, body) = app
        .post(
            &format!("/api/v1/products/{}/sale", product_id),
            json!({"amount": 20}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient stock"));

    // The rejected sale left the quantity untouched
    let (status, body) = app.get(&format!("/api/v1/products/{}", product_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 15);

    // Selling everything drains the stock
    let (status, body) = app
        .post(
            &format!("/api/v1/products/{}/sale", product_id),
            json!({"amount": 15}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["new_quantity"], 0);

    // Update, then delete
    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/products/{}", product_id),
            Some(json!({"name": "Widget Mk2"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Widget Mk2");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/products/{}", product_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/products/{}", product_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_movement_amounts_return_bad_request() {
    let app = TestApp::new().await;

    let (_, body) = app
        .post(
            "/api/v1/products",
            json!({"name": "Widget", "sku": "wd-1", "quantity": 10, "price": "2.50"}),
        )
        .await;
    let product_id = body["id"].as_str().unwrap().to_string();

    for amount in [0, -5] {
        let (status, _) = app
            .post(
                &format!("/api/v1/products/{}/purchase", product_id),
                json!({"amount": amount}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let app = TestApp::new().await;
    let unknown = uuid::Uuid::new_v4();

    let (status, _) = app.get(&format!("/api/v1/products/{}", unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            &format!("/api/v1/products/{}/purchase", unknown),
            json!({"amount": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/api/v1/categories/{}", unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sku_returns_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/v1/products",
            json!({"name": "Widget", "sku": "wd-1", "price": "2.50"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/api/v1/products",
            json!({"name": "Widget clone", "sku": "WD-1", "price": "2.50"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn product_search_filters_by_query_param() {
    let app = TestApp::new().await;

    for (name, sku) in [("Widget", "wd-1"), ("Gadget", "gd-1")] {
        app.post(
            "/api/v1/products",
            json!({"name": name, "sku": sku, "quantity": 1, "price": "1.00"}),
        )
        .await;
    }

    let (status, body) = app.get("/api/v1/products?q=wid").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Widget");
    assert_eq!(body["pagination"]["total"], 1);

    let (_, body) = app.get("/api/v1/products").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    // Ordered by name
    assert_eq!(body["data"][0]["name"], "Gadget");
    assert_eq!(body["data"][1]["name"], "Widget");
}

#[tokio::test]
async fn movement_listings_are_newest_first() {
    let app = TestApp::new().await;

    let (_, body) = app
        .post(
            "/api/v1/products",
            json!({"name": "Widget", "sku": "wd-1", "quantity": 0, "price": "2.50"}),
        )
        .await;
    let product_id = body["id"].as_str().unwrap().to_string();

    for amount in [1, 2, 3] {
        app.post(
            &format!("/api/v1/products/{}/purchase", product_id),
            json!({"amount": amount}),
        )
        .await;
        // Distinct timestamps keep the expected order unambiguous
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (status, body) = app.get("/api/v1/purchases").await;
    assert_eq!(status, StatusCode::OK);
    let quantities: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![3, 2, 1]);
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn dashboard_endpoint_reports_aggregates() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_products"], 0);
    assert_eq!(body["total_units"], 0);
    assert!(body["low_stock"].as_array().unwrap().is_empty());

    app.post(
        "/api/v1/products",
        json!({"name": "Widget", "sku": "wd-1", "quantity": 4, "price": "2.50"}),
    )
    .await;

    let (_, body) = app.get("/api/v1/dashboard").await;
    assert_eq!(body["total_products"], 1);
    assert_eq!(body["total_units"], 4);
    assert_eq!(decimal_field(&body, "inventory_value"), dec!(10.00));
    assert_eq!(body["low_stock"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_endpoint_reports_up() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}
