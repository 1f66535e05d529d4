//! 存储故障与 ID 校验测试（mock 存储）

mod common;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, StatusCode},
};
use common::send;
use products_api::{api::http::build_app, state::AppState};
use products_config::HttpConfig;
use products_errors::AppError;
use products_ports::MockProductStore;
use serde_json::json;

fn app_with(store: MockProductStore, expose_detail: bool) -> Router {
    let state = AppState::new(Arc::new(store)).with_error_detail(expose_detail);
    build_app(state, &HttpConfig::default())
}

fn object_id_store() -> MockProductStore {
    let mut store = MockProductStore::new();
    store.expect_backend().return_const("mock");
    store
        .expect_is_valid_id()
        .returning(|id| id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit()));
    store
}

#[tokio::test]
async fn test_malformed_id_never_reaches_store() {
    // 未设置 find/update/delete 期望，任何存储调用都会 panic
    let app = app_with(object_id_store(), true);

    let (status, error) = send(&app, Method::GET, "/products/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid product id");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/products/not-an-id",
        Some(json!({"name": "X", "price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/products/zzzzzzzzzzzzzzzzzzzzzzzz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_payload_never_reaches_store() {
    let app = app_with(object_id_store(), true);

    let (status, error) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({"name": "Pen", "price": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "price must be >= 0");
}

#[tokio::test]
async fn test_store_failure_exposes_detail_when_enabled() {
    let mut store = object_id_store();
    store
        .expect_find_all()
        .times(1)
        .returning(|| Err(AppError::database("connection refused")));
    let app = app_with(store, true);

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Internal server error", "detail": "connection refused"})
    );
}

#[tokio::test]
async fn test_store_failure_hides_detail_when_disabled() {
    let mut store = object_id_store();
    store
        .expect_find_by_id()
        .times(1)
        .returning(|_| Err(AppError::database("connection refused")));
    let app = app_with(store, false);

    let (status, body) = send(&app, Method::GET, "/products/0123456789abcdef01234567", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_update_miss_is_not_found() {
    let mut store = object_id_store();
    store
        .expect_update_by_id()
        .times(1)
        .returning(|_, _| Ok(None));
    let app = app_with(store, true);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/products/0123456789abcdef01234567",
        Some(json!({"price": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_store_health_failure() {
    let mut store = object_id_store();
    store
        .expect_ping()
        .returning(|| Err(AppError::database("server selection timeout")));

    let (status, body) = send(&app_with(store, true), Method::GET, "/db/health", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"ok": false, "error": "server selection timeout"}));
}
