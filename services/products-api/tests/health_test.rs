//! 健康检查路由测试

mod common;

use axum::http::{Method, StatusCode};
use common::{memory_app, send};

#[tokio::test]
async fn test_service_health() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "products-api");
    assert_eq!(body["driver"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_store_health_reports_latency() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/db/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["latencyMs"].is_u64());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_metrics_not_found_without_recorder() {
    let app = memory_app();

    let (status, _) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
