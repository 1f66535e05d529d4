//! 基础设施资源管理
//!
//! 按配置选择存储后端，进程内只创建一次，通过 `Arc<dyn ProductStore>` 共享

use std::sync::Arc;
use std::time::Duration;

use products_adapter_memory::InMemoryProductStore;
use products_adapter_mongodb::{MongoConfig, MongoProductStore};
use products_adapter_postgres::{PostgresConfig, PostgresProductStore, SslMode};
use products_config::{AppConfig, SslMode as ConfigSslMode, StoreBackend};
use products_errors::{AppError, AppResult};
use products_ports::ProductStore;
use secrecy::ExposeSecret;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// 商品存储
    store: Arc<dyn ProductStore>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let store = connect_store(&config).await?;
        info!(backend = %config.store.backend, "Product store initialized");
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        self.store.clone()
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// 释放存储连接
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

async fn connect_store(config: &AppConfig) -> AppResult<Arc<dyn ProductStore>> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let db = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::internal("missing [database] config"))?;

            let mut pg_config = PostgresConfig::new(db.url.expose_secret())
                .with_pool(0, db.max_connections)
                .with_acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
                .with_ssl_mode(ssl_mode(db.ssl_mode))
                .with_application_name(&config.app_name);
            if let Some(schema) = &db.schema {
                pg_config = pg_config.with_schema(schema);
            }

            info!(
                max_connections = db.max_connections,
                "Creating PostgreSQL connection pool"
            );
            Ok(Arc::new(PostgresProductStore::connect(&pg_config).await?))
        }
        StoreBackend::Mongodb => {
            let mongo = config
                .mongodb
                .as_ref()
                .ok_or_else(|| AppError::internal("missing [mongodb] config"))?;

            let mongo_config = MongoConfig::new(mongo.url.expose_secret())
                .with_database(&mongo.database)
                .with_collection(&mongo.collection)
                .with_server_selection_timeout(Duration::from_secs(
                    mongo.server_selection_timeout_secs,
                ))
                .with_app_name(&config.app_name);

            Ok(Arc::new(MongoProductStore::connect(&mongo_config).await?))
        }
        StoreBackend::Memory => Ok(Arc::new(InMemoryProductStore::new())),
    }
}

fn ssl_mode(mode: ConfigSslMode) -> SslMode {
    match mode {
        ConfigSslMode::Disable => SslMode::Disable,
        ConfigSslMode::Prefer => SslMode::Prefer,
        ConfigSslMode::Require => SslMode::Require,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{
        Figment,
        providers::{Format, Toml},
    };

    fn config(toml: &str) -> AppConfig {
        AppConfig::from_figment(Figment::new().merge(Toml::string(toml))).unwrap()
    }

    #[tokio::test]
    async fn test_memory_backend_is_default() {
        let infra = Infrastructure::from_config(config("")).await.unwrap();
        assert_eq!(infra.backend(), "memory");
        infra.store().ping().await.unwrap();
    }

    #[test]
    fn test_ssl_mode_from_config() {
        assert_eq!(ssl_mode(ConfigSslMode::Disable), SslMode::Disable);
        assert_eq!(ssl_mode(ConfigSslMode::Prefer), SslMode::Prefer);
        assert_eq!(ssl_mode(ConfigSslMode::Require), SslMode::Require);
    }

    #[tokio::test]
    async fn test_postgres_backend_starts_without_reachable_database() {
        let infra = Infrastructure::from_config(config(
            r#"
            [store]
            backend = "postgres"
            [database]
            url = "postgres://nobody@127.0.0.1:1/none"
            acquire_timeout_secs = 1
            "#,
        ))
        .await
        .unwrap();

        assert_eq!(infra.backend(), "postgres");
        assert!(infra.store().ping().await.is_err());
        infra.shutdown().await;
    }
}
