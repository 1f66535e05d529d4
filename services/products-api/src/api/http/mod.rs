//! HTTP 路由

mod health;
mod products;

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use products_config::HttpConfig;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

pub use health::*;
pub use products::*;

/// 业务路由（不含中间件）
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/health", get(service_health))
        .route("/db/health", get(store_health))
        .route("/metrics", get(render_metrics))
        .with_state(state)
}

/// 完整应用：业务路由 + CORS / 请求日志 / 超时
pub fn build_app(state: AppState, http: &HttpConfig) -> Router {
    routes(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(http.request_timeout_secs),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
