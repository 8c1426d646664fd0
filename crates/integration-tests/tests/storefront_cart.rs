//! Integration tests for the session-backed cart API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use pantry_core::{CartLine, ProductId};
use pantry_integration_tests::{TestContext, decimal, product_json};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn lines(body: &Value) -> Vec<CartLine> {
    serde_json::from_value(body["lines"].clone()).unwrap()
}

fn total(body: &Value) -> Decimal {
    decimal(&body["total"]).unwrap()
}

/// `total == sum(price * quantity)` computed independently of the server.
fn assert_total_consistent(body: &Value) {
    let expected: Decimal = lines(body)
        .iter()
        .map(|l| l.product.price.amount() * Decimal::from(l.quantity))
        .sum();
    assert_eq!(total(body), expected);
}

#[tokio::test]
async fn test_empty_cart_for_new_visitor() {
    let mut ctx = TestContext::new();

    let resp = ctx.get("/cart").await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert!(lines(&body).is_empty());
    assert_eq!(total(&body), Decimal::ZERO);
}

#[tokio::test]
async fn test_add_same_product_twice_merges_line() {
    let mut ctx = TestContext::new();

    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 2 }))
        .await;
    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 3 }))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    let lines = lines(&body);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(total(&body), Decimal::from(50));
    assert_eq!(body["itemCount"], 5);
}

#[tokio::test]
async fn test_add_defaults_quantity_to_one() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("A", "2.50") }))
        .await;

    let body = resp.json();
    assert_eq!(lines(&body)[0].quantity, 1);
    assert_eq!(total(&body), Decimal::new(250, 2));
}

#[tokio::test]
async fn test_cart_persists_across_requests_in_session() {
    let mut ctx = TestContext::new();

    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 1 }))
        .await;
    ctx.post("/cart/add", &json!({ "product": product_json("B", "4"), "quantity": 2 }))
        .await;

    let body = ctx.get("/cart").await.json();
    let ids: Vec<ProductId> = lines(&body).into_iter().map(|l| l.product.id).collect();
    assert_eq!(ids, [ProductId::new("A"), ProductId::new("B")]);
    assert_total_consistent(&body);

    let count = ctx.get("/cart/count").await.json();
    assert_eq!(count["count"], 3);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut ctx = TestContext::new();
    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 1 }))
        .await;

    ctx.forget_session();
    let body = ctx.get("/cart").await.json();

    assert!(lines(&body).is_empty());
}

#[tokio::test]
async fn test_update_quantity_present_and_absent() {
    let mut ctx = TestContext::new();
    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 1 }))
        .await;
    ctx.post("/cart/add", &json!({ "product": product_json("B", "3"), "quantity": 1 }))
        .await;

    let body = ctx
        .post("/cart/update", &json!({ "productId": "A", "quantity": 4 }))
        .await
        .json();
    let updated = lines(&body);
    assert_eq!(updated[0].quantity, 4);
    assert_eq!(updated[1].quantity, 1);
    assert_eq!(total(&body), Decimal::from(43));

    let unchanged = ctx
        .post("/cart/update", &json!({ "productId": "missing", "quantity": 9 }))
        .await
        .json();
    assert_eq!(lines(&unchanged), updated);
    assert_eq!(total(&unchanged), total(&body));
}

#[tokio::test]
async fn test_remove_present_and_absent() {
    let mut ctx = TestContext::new();
    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 2 }))
        .await;

    let unchanged = ctx
        .post("/cart/remove", &json!({ "productId": "missing" }))
        .await
        .json();
    assert_eq!(lines(&unchanged).len(), 1);
    assert_eq!(total(&unchanged), Decimal::from(20));

    let body = ctx
        .post("/cart/remove", &json!({ "productId": "A" }))
        .await
        .json();
    assert!(lines(&body).is_empty());
    assert_eq!(total(&body), Decimal::ZERO);
}

#[tokio::test]
async fn test_clear_cart_zeroes_total() {
    let mut ctx = TestContext::new();
    ctx.post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": 2 }))
        .await;
    ctx.post("/cart/add", &json!({ "product": product_json("B", "1.25"), "quantity": 4 }))
        .await;

    let body = ctx.post("/cart/clear", &json!({})).await.json();

    assert!(lines(&body).is_empty());
    assert_eq!(total(&body), Decimal::ZERO);
    assert_eq!(body["itemCount"], 0);
}

#[tokio::test]
async fn test_negative_quantity_accepted() {
    let mut ctx = TestContext::new();

    let body = ctx
        .post("/cart/add", &json!({ "product": product_json("A", "10"), "quantity": -1 }))
        .await
        .json();

    assert_eq!(lines(&body)[0].quantity, -1);
    assert_total_consistent(&body);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let mut ctx = TestContext::new();

    let resp = ctx.post("/cart/add", &json!({ "quantity": 2 })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("A", "-5") }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_responses_carry_api_headers() {
    let mut ctx = TestContext::new();

    let resp = ctx.get("/cart").await;

    assert_eq!(resp.headers["cache-control"], "no-store");
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let mut ctx = TestContext::new();

    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = ctx.get("/faq").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_overflowing_total_is_rejected() {
    let mut ctx = TestContext::new();
    let max = Decimal::MAX.to_string();

    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("A", &max), "quantity": 2 }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    ctx.post("/cart/add", &json!({ "product": product_json("A", &max), "quantity": 1 }))
        .await;
    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("B", "1"), "quantity": 1 }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let body = ctx.get("/cart").await.json();
    assert_eq!(lines(&body).len(), 1);
    assert_eq!(total(&body), Decimal::MAX);
}

#[tokio::test]
async fn test_update_overflowing_total_is_rejected() {
    let mut ctx = TestContext::new();
    let max = Decimal::MAX.to_string();
    ctx.post("/cart/add", &json!({ "product": product_json("A", &max), "quantity": 1 }))
        .await;

    let resp = ctx
        .post("/cart/update", &json!({ "productId": "A", "quantity": 5 }))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = ctx.get("/cart").await.json();
    assert_eq!(lines(&body)[0].quantity, 1);
}

#[tokio::test]
async fn test_add_overflowing_quantity_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.post("/cart/add", &json!({ "product": product_json("A", "1"), "quantity": i64::MAX }))
        .await;

    let resp = ctx
        .post("/cart/add", &json!({ "product": product_json("A", "1"), "quantity": 1 }))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let body = ctx.get("/cart").await.json();
    assert_eq!(lines(&body)[0].quantity, i64::MAX);
    assert_eq!(body["itemCount"], i64::MAX);
}
