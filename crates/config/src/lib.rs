//! products-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! 1. `{config_dir}/default.toml`
//! 2. `{config_dir}/{APP_ENV}.toml`
//! 3. `PRODUCTS_` 前缀的环境变量，嵌套字段用 `__` 分隔
//! 4. `PORT` 环境变量覆盖 `server.port`

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Missing config section `{section}` required by store backend `{backend}`")]
    MissingSection {
        section: &'static str,
        backend: StoreBackend,
    },
}

/// 存储后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL（关系型）
    Postgres,
    /// MongoDB（文档型）
    Mongodb,
    /// 进程内存储，用于本地开发
    #[default]
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Mongodb => "mongodb",
            StoreBackend::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 存储选择
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// 单次存储调用的超时，超时按存储故障处理
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,
}

fn default_operation_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            operation_timeout_secs: default_operation_timeout_secs(),
        }
    }
}

/// PostgreSQL SSL 模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

/// 数据库配置（PostgreSQL）
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 表所在的 schema，为空时使用连接默认的 search_path
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    /// URL 中已带 `sslmode` 时忽略
    #[serde(default)]
    pub ssl_mode: SslMode,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

/// MongoDB 配置
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub url: Secret<String>,
    #[serde(default = "default_mongo_database")]
    pub database: String,
    #[serde(default = "default_mongo_collection")]
    pub collection: String,
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
}

fn default_mongo_database() -> String {
    "products".to_string()
}

fn default_mongo_collection() -> String {
    "products".to_string()
}

fn default_server_selection_timeout_secs() -> u64 {
    5
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否暴露 `/metrics`
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// HTTP 层配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// 500 响应是否携带底层错误详情，未设置时非生产环境开启
    #[serde(default)]
    pub expose_error_detail: Option<bool>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            expose_error_detail: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub database: Option<DatabaseConfig>,
    pub mongodb: Option<MongoConfig>,
}

fn default_app_name() -> String {
    "products-api".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("PRODUCTS_").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()));

        Self::from_figment(figment)
    }

    /// 从已组装的 Figment 提取并校验配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// 校验所选后端的配置段是否存在
    pub fn validate(&self) -> Result<(), ConfigError> {
        let backend = self.store.backend;
        match backend {
            StoreBackend::Postgres if self.database.is_none() => Err(ConfigError::MissingSection {
                section: "database",
                backend,
            }),
            StoreBackend::Mongodb if self.mongodb.is_none() => Err(ConfigError::MissingSection {
                section: "mongodb",
                backend,
            }),
            _ => Ok(()),
        }
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// 500 响应是否携带 `detail`
    pub fn expose_error_detail(&self) -> bool {
        self.http
            .expose_error_detail
            .unwrap_or(!self.is_production())
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
