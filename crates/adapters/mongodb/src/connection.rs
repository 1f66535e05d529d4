//! MongoDB 连接管理

use bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use products_errors::{AppError, AppResult};

use crate::config::MongoConfig;

/// 创建 MongoDB 客户端
///
/// 只解析连接串，不等待服务器可用
pub async fn create_client(config: &MongoConfig) -> AppResult<Client> {
    let mut options = ClientOptions::parse(config.url.as_str())
        .await
        .map_err(|e| AppError::database(format!("Invalid MongoDB url: {}", e)))?;
    options.server_selection_timeout = Some(config.server_selection_timeout);
    options.app_name = config.app_name.clone();

    Client::with_options(options)
        .map_err(|e| AppError::database(format!("Failed to create MongoDB client: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(database: &Database) -> AppResult<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}
