//! MongoDB 配置

use std::time::Duration;

/// MongoDB 配置
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// 连接串
    pub url: String,
    /// 数据库名
    pub database: String,
    /// 集合名
    pub collection: String,
    /// 服务器选择超时
    pub server_selection_timeout: Duration,
    /// 应用名称（用于连接标识）
    pub app_name: Option<String>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "products".to_string(),
            collection: "products".to_string(),
            server_selection_timeout: Duration::from_secs(5),
            app_name: None,
        }
    }
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }
}
