//! 商品 CRUD handler

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{HeaderMap, StatusCode, header},
};
use products_domain::{Product, ProductPayload};
use products_errors::AppError;
use serde::Serialize;
use tracing::debug;

use crate::api::ApiError;
use crate::state::AppState;

pub const INVALID_JSON_BODY: &str = "invalid JSON body";

/// 删除成功响应
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub id: String,
}

/// 商品请求体
///
/// 空请求体或非 JSON content-type 视为 `{}`；JSON 格式错误返回 400
#[derive(Debug, Default)]
pub struct ProductBody(pub ProductPayload);

impl<S> FromRequest<S> for ProductBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection, "Failed to read request body");
            invalid_json()
        })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            debug!(error = %e, "Rejected request body");
            invalid_json()
        })
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || essence.to_ascii_lowercase().ends_with("+json")
}

fn invalid_json() -> ApiError {
    ApiError::new(AppError::validation(INVALID_JSON_BODY), false)
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list().await.map_err(|e| state.error(e))?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.get(&id).await.map_err(|e| state.error(e))?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ProductBody(payload): ProductBody,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(payload).await.map_err(|e| state.error(e))?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ProductBody(payload): ProductBody,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .update(&id, payload)
        .await
        .map_err(|e| state.error(e))?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = state.products.delete(&id).await.map_err(|e| state.error(e))?;
    Ok(Json(DeleteResponse {
        message: "Product deleted",
        id: id.to_string(),
    }))
}
