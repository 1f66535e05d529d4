//! HTTP 错误响应

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use products_errors::AppError;
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// 错误响应体：`{"error": ..., "detail": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 可直接作为 handler 返回值的错误
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// 4xx 原样返回错误信息；5xx 统一为 "Internal server error"，
    /// 仅在 `expose_detail` 时附带底层错误
    pub fn new(err: AppError, expose_detail: bool) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if err.is_server_error() {
            ErrorBody {
                error: INTERNAL_SERVER_ERROR.to_string(),
                detail: expose_detail.then(|| err.message().to_string()),
            }
        } else {
            ErrorBody {
                error: err.message().to_string(),
                detail: None,
            }
        };

        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_message() {
        let err = ApiError::new(AppError::validation("name & price required"), true);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error, "name & price required");
        assert_eq!(err.body().detail, None);
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::new(AppError::not_found("Product not found"), false);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body().error, "Product not found");
    }

    #[test]
    fn test_store_failure_detail_follows_policy() {
        let exposed = ApiError::new(AppError::database("connection refused"), true);
        assert_eq!(exposed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(exposed.body().error, INTERNAL_SERVER_ERROR);
        assert_eq!(exposed.body().detail.as_deref(), Some("connection refused"));

        let redacted = ApiError::new(AppError::database("connection refused"), false);
        assert_eq!(redacted.body().error, INTERNAL_SERVER_ERROR);
        assert_eq!(redacted.body().detail, None);
    }

    #[test]
    fn test_detail_omitted_from_json_when_absent() {
        let body = ErrorBody {
            error: "Product not found".to_string(),
            detail: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Product not found"}"#
        );
    }
}
