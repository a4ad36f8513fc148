//! Handler tests for the Products domain
//!
//! These tests verify the HTTP adapter over the in-memory store:
//! - Request deserialization and DTO mapping
//! - HTTP status codes
//! - The shared error envelope
//!
//! Only the products router is exercised, not the full application.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn stored(name: &str, price: f64) -> Product {
    let mut product = Product::new(name, "", price);
    product.id = Uuid::now_v7();
    product
}

fn app_with(store: &InMemoryProductStore) -> Router {
    handlers::router(ProductService::new(store.clone()))
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let store = InMemoryProductStore::new();
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let response = app_with(&store)
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "name": builder.name("product", "lamp"),
                "description": "brass",
                "price": 40.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ProductDto = json_body(response.into_body()).await;
    assert!(!created.id.is_nil());
    assert_eq!(created.name, builder.name("product", "lamp"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_product_validates_content() {
    let store = InMemoryProductStore::new();

    for body in [
        json!({ "name": "  ", "price": 3.0 }),
        json!({ "name": "Lamp", "price": 0.0 }),
        json!({ "name": "Lamp", "price": -2.0 }),
    ] {
        let response = app_with(&store)
            .oneshot(json_request("POST", "/", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_product_rejects_null_body() {
    let store = InMemoryProductStore::new();

    let response = app_with(&store)
        .oneshot(json_request("POST", "/", Value::Null))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["code"], 1012);
    assert_eq!(error["message"], "Argument 'product' is required");
}

#[tokio::test]
async fn test_create_product_rejects_malformed_json() {
    let store = InMemoryProductStore::new();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app_with(&store).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_list_products_pages_search_results() {
    let store = InMemoryProductStore::with_products(
        (0..12).map(|i| stored(&format!("Green tea {i:02}"), 4.0)),
    );
    store
        .commit({
            let mut changes = ChangeSet::new();
            changes.insert(Product::new("Red wine", "", 9.0));
            changes
        })
        .await
        .unwrap();

    let response = app_with(&store)
        .oneshot(empty_request("GET", "/?searchTerm=GREEN&page=1&pageSize=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: Vec<ProductDto> = json_body(response.into_body()).await;
    let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Green tea 05", "Green tea 06", "Green tea 07", "Green tea 08", "Green tea 09"]
    );
}

#[tokio::test]
async fn test_list_products_defaults_to_first_ten() {
    let store =
        InMemoryProductStore::with_products((0..15).map(|i| stored(&format!("item {i}"), 1.0)));

    let response = app_with(&store)
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();

    let page: Vec<ProductDto> = json_body(response.into_body()).await;
    assert_eq!(page.len(), 10);
}

#[tokio::test]
async fn test_list_products_rejects_bad_paging() {
    let store = InMemoryProductStore::new();

    for (uri, message) in [
        ("/?page=-1", "Argument 'page' is out of range"),
        ("/?pageSize=0", "Argument 'pageSize' is out of range"),
    ] {
        let response = app_with(&store)
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["message"], message);
    }

    let response = app_with(&store)
        .oneshot(empty_request("GET", "/?page=first"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_product_statuses() {
    let lamp = stored("Lamp", 40.0);
    let store = InMemoryProductStore::with_products([lamp.clone()]);
    let unknown = TestDataBuilder::from_test_name("handler_get_unknown").unknown_id();

    let response = app_with(&store)
        .oneshot(empty_request("GET", &format!("/{}", lamp.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found: ProductDto = json_body(response.into_body()).await;
    assert_eq!(found, ProductDto::from(lamp));

    let response = app_with(&store)
        .oneshot(empty_request("GET", &format!("/{unknown}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app_with(&store)
        .oneshot(empty_request("GET", &format!("/{}", Uuid::nil())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app_with(&store)
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_update_product_statuses() {
    let lamp = stored("Lamp", 40.0);
    let store = InMemoryProductStore::with_products([lamp.clone()]);
    let unknown = TestDataBuilder::from_test_name("handler_update_unknown").unknown_id();
    let body = json!({ "name": "Desk lamp", "description": "steel", "price": 55.0 });

    let response = app_with(&store)
        .oneshot(json_request("PUT", &format!("/{}", lamp.id), body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductDto = json_body(response.into_body()).await;
    assert_eq!(updated.id, lamp.id);
    assert_eq!(updated.name, "Desk lamp");

    let saved = store.find(lamp.id).await.unwrap().unwrap();
    assert_eq!(saved.price, 55.0);

    let response = app_with(&store)
        .oneshot(json_request("PUT", &format!("/{unknown}"), body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app_with(&store)
        .oneshot(json_request("PUT", &format!("/{}", Uuid::nil()), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app_with(&store)
        .oneshot(json_request("PUT", &format!("/{}", lamp.id), Value::Null))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_product_statuses() {
    let lamp = stored("Lamp", 40.0);
    let store = InMemoryProductStore::with_products([lamp.clone()]);

    let response = app_with(&store)
        .oneshot(empty_request("DELETE", &format!("/{}", lamp.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty().await);

    // Gone now, so a second delete is a 404
    let response = app_with(&store)
        .oneshot(empty_request("DELETE", &format!("/{}", lamp.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app_with(&store)
        .oneshot(empty_request("DELETE", &format!("/{}", Uuid::nil())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
