//! products-errors - 统一错误处理
//!
//! 校验错误、未找到、存储失败三类错误，以及到 HTTP 状态码的映射

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Database(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 是否为服务端错误（5xx）
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 错误携带的原始信息（不含变体前缀）
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::database("x").status_code(), 500);
        assert_eq!(AppError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AppError::database("connection refused").is_server_error());
        assert!(!AppError::validation("bad id").is_server_error());
        assert!(!AppError::not_found("gone").is_server_error());
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::database("connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.to_string(), "Database error: connection refused");
    }
}
