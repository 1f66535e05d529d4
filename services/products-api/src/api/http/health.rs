//! 健康检查与指标

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::state::AppState;

/// `GET /health` 响应
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    pub service: String,
    pub driver: &'static str,
    pub version: &'static str,
}

/// `GET /db/health` 响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 进程存活检查，不访问存储
pub async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "ok",
        service: state.service_name.clone(),
        driver: state.products.backend(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 存储连通性检查
pub async fn store_health(State(state): State<AppState>) -> (StatusCode, Json<StoreHealth>) {
    match state.products.check_store().await {
        Ok(latency_ms) => (
            StatusCode::OK,
            Json(StoreHealth {
                ok: true,
                latency_ms: Some(latency_ms),
                error: None,
            }),
        ),
        Err(e) => {
            let error = if state.expose_error_detail {
                e.message().to_string()
            } else {
                "store unavailable".to_string()
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StoreHealth {
                    ok: false,
                    latency_ms: None,
                    error: Some(error),
                }),
            )
        }
    }
}

/// Prometheus 文本格式指标；未启用时返回 404
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(recorder) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            recorder.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
