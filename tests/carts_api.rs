use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use garments_back::{
    AppError, AppState, app,
    config::StripeConfig,
    models::{Product, VerifiedUser},
    services::{OrderService, TokenVerifier},
    store::MemoryOrderStore,
};
use http_body_util::BodyExt;
use rust_decimal::dec;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

/// Accepts tokens of the form `token-for:<email>`.
struct StaticVerifier;

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> garments_back::Result<VerifiedUser> {
        token
            .strip_prefix("token-for:")
            .map(|email| VerifiedUser {
                uid: format!("uid-{}", email),
                email: email.to_string(),
            })
            .ok_or_else(|| AppError::Unauthorized("unauthorized access".to_string()))
    }
}

fn sample_product() -> Product {
    Product {
        id: Uuid::new_v4(),
        product_name: "Polo shirt".to_string(),
        description: Some("Pique cotton".to_string()),
        category: Some("shirts".to_string()),
        price: dec!(10),
        available_quantity: 5,
        minimum_order_quantity: 2,
        images: vec!["https://cdn.example/polo.jpg".to_string()],
        demo_video: None,
        created_by: "seller@x.com".to_string(),
        created_at: Utc::now(),
    }
}

async fn test_app(product: &Product) -> (Router, Arc<MemoryOrderStore>) {
    let store = Arc::new(MemoryOrderStore::new());
    store.insert_product(product.clone()).await;

    // Never connected: the cart routes only go through the order store.
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/garments_test")
        .unwrap();

    let state = AppState {
        db,
        orders: OrderService::new(store.clone()),
        verifier: Arc::new(StaticVerifier),
        http: reqwest::Client::new(),
        stripe: StripeConfig {
            secret_key: "sk_test".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            site_domain: "https://shop.example".to_string(),
        },
    };

    (app::router(state), store)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn order_body(product_id: &str, qty: Value) -> Value {
    json!({
        "productId": product_id,
        "productName": "whatever the client says",
        "orderedQty": qty,
        "userEmail": "a@x.com",
        "paymentStatus": "unpaid",
    })
}

async fn stock(store: &MemoryOrderStore, id: Uuid) -> i32 {
    store.product(id).await.unwrap().available_quantity
}

#[tokio::test]
async fn test_place_order_scenario() {
    let product = sample_product();
    let (app, store) = test_app(&product).await;
    let id = product.id.to_string();

    let (status, body) = send(&app, post_json("/carts", order_body(&id, json!(3)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Order placed successfully"));
    assert_eq!(body["order"]["totalPrice"].as_f64(), Some(30.0));
    assert_eq!(body["order"]["orderedQty"], json!(3));
    assert_eq!(body["order"]["productName"], json!("Polo shirt"));
    assert_eq!(body["order"]["paymentStatus"], json!("unpaid"));
    assert!(body["order"]["_id"].is_string());
    assert_eq!(stock(&store, product.id).await, 2);

    let (status, body) = send(&app, post_json("/carts", order_body(&id, json!(3)))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], json!("insufficient_stock"));
    assert_eq!(stock(&store, product.id).await, 2);
    assert_eq!(store.order_count().await, 1);
}

#[tokio::test]
async fn test_place_order_below_minimum() {
    let product = sample_product();
    let (app, store) = test_app(&product).await;

    let (status, body) = send(
        &app,
        post_json("/carts", order_body(&product.id.to_string(), json!(1))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], json!("invalid_argument"));
    assert_eq!(body["message"], json!("Minimum order quantity is 2"));
    assert_eq!(stock(&store, product.id).await, 5);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_unknown_product() {
    let product = sample_product();
    let (app, store) = test_app(&product).await;

    let (status, body) = send(
        &app,
        post_json("/carts", order_body(&Uuid::new_v4().to_string(), json!(2))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], json!("not_found"));
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn test_place_order_malformed_input() {
    let product = sample_product();
    let (app, store) = test_app(&product).await;

    for body in [
        order_body("64f1a2b3c4d5e6f708192a3b", json!(2)),
        order_body(&product.id.to_string(), json!("lots")),
        json!({ "productId": product.id.to_string(), "userEmail": "a@x.com" }),
        json!({ "productId": 12345, "orderedQty": 2, "userEmail": "a@x.com" }),
    ] {
        let (status, body) = send(&app, post_json("/carts", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_argument"));
    }

    let not_json = Request::builder()
        .method("POST")
        .uri("/carts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, body) = send(&app, not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["kind"], json!("invalid_argument"));

    assert_eq!(stock(&store, product.id).await, 5);
}

#[tokio::test]
async fn test_user_carts_require_matching_token() {
    let product = sample_product();
    let (app, _) = test_app(&product).await;
    let id = product.id.to_string();

    send(&app, post_json("/carts", order_body(&id, json!(2)))).await;

    let unauthenticated = Request::builder()
        .uri("/carts/a@x.com")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, unauthenticated).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_user = Request::builder()
        .uri("/carts/a@x.com")
        .header(header::AUTHORIZATION, "Bearer token-for:b@x.com")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, other_user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("forbidden access"));

    let owner = Request::builder()
        .uri("/carts/a@x.com")
        .header(header::AUTHORIZATION, "Bearer token-for:a@x.com")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_payment_success_marks_cart_paid() {
    let product = sample_product();
    let (app, _) = test_app(&product).await;

    let (_, placed) = send(
        &app,
        post_json("/carts", order_body(&product.id.to_string(), json!(2))),
    )
    .await;
    let cart_id = placed["order"]["_id"].as_str().unwrap().to_string();

    let patch = Request::builder()
        .method("PATCH")
        .uri(format!("/carts/payment-success/{}", cart_id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, patch).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let get = Request::builder()
        .uri(format!("/carts/by-id/{}", cart_id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, get).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paymentStatus"], json!("paid"));

    // A paid cart never reaches the payment provider again.
    let (status, body) = send(
        &app,
        post_json("/create-checkout-session", json!({ "cartId": cart_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Order is already paid"));
}

#[tokio::test]
async fn test_unknown_cart_is_not_found() {
    let product = sample_product();
    let (app, _) = test_app(&product).await;

    let patch = Request::builder()
        .method("PATCH")
        .uri(format!("/carts/payment-success/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, patch).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], json!("not_found"));
}

#[tokio::test]
async fn test_root_answers_plain_text() {
    let product = sample_product();
    let (app, _) = test_app(&product).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Garments");
}
