//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusHandle};

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder
    pub fn install() -> Result<Self, BuildError> {
        let handle = products_telemetry::init_metrics()?;
        Ok(Self { handle })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录存储操作
pub fn record_store_operation(operation: &str, backend: &str, duration_ms: f64, success: bool) {
    let labels = [
        ("operation", operation.to_string()),
        ("backend", backend.to_string()),
        ("success", success.to_string()),
    ];

    counter!("store_operations_total", &labels).increment(1);
    histogram!("store_operation_duration_ms", &labels).record(duration_ms);
}

/// 存储操作计时器
pub struct StoreTimer {
    start: Instant,
    operation: &'static str,
    backend: &'static str,
}

impl StoreTimer {
    pub fn start(operation: &'static str, backend: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            backend,
        }
    }

    /// 结束计时并记录
    pub fn finish(self, success: bool) {
        let duration_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        record_store_operation(self.operation, self.backend, duration_ms, success);
    }
}
