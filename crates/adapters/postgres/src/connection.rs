//! PostgreSQL 连接管理

use products_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::PostgresConfig;

/// 创建 PostgreSQL 连接池
///
/// 连接延迟建立：数据库暂时不可达时服务仍可启动，由 `/db/health` 反映存储状态
pub fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_lazy(&config.connection_url())
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}
