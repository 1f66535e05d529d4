//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;

use anyhow::Context;
use axum::Router;
use products_config::AppConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 1. 加载配置
/// 2. 初始化运行时（日志）
/// 3. 安装 metrics recorder（可选）
/// 4. 创建存储（数据库不可达时只记录日志，不阻止启动）
/// 5. 调用 `build_router` 构建路由
/// 6. 启动服务器并处理 graceful shutdown
/// 7. 关闭存储连接
pub async fn run<F>(config_dir: &str, build_router: F) -> anyhow::Result<()>
where
    F: FnOnce(&Infrastructure, Option<MetricsRecorder>) -> Router,
{
    let config = AppConfig::load(config_dir).context("Failed to load configuration")?;

    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = if config.telemetry.metrics_enabled {
        match MetricsRecorder::install() {
            Ok(recorder) => Some(recorder),
            Err(e) => {
                warn!(error = %e, "Prometheus recorder not installed");
                None
            }
        }
    } else {
        None
    };

    let infra = Infrastructure::from_config(config)
        .await
        .context("Failed to initialize product store")?;

    let router = build_router(&infra, metrics);

    let addr = infra.config().bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, backend = infra.backend(), "HTTP server starting");

    serve(listener, router, shutdown_signal()).await?;

    infra.shutdown().await;

    info!("Service stopped");

    Ok(())
}

/// 在给定 listener 上运行路由，直到 `signal` 完成
pub async fn serve<S>(listener: TcpListener, router: Router, signal: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await
        .context("HTTP server error")
}
