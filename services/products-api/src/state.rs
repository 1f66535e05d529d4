//! 路由共享状态

use std::sync::Arc;
use std::time::Duration;

use products_bootstrap::{Infrastructure, MetricsRecorder};
use products_errors::AppError;
use products_ports::ProductStore;

use crate::api::ApiError;
use crate::application::ProductService;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub service_name: String,
    /// 500 响应是否携带底层错误详情
    pub expose_error_detail: bool,
    pub metrics: Option<MetricsRecorder>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self::from_service(ProductService::new(store))
    }

    pub fn from_service(service: ProductService) -> Self {
        Self {
            products: Arc::new(service),
            service_name: "products-api".to_string(),
            expose_error_detail: true,
            metrics: None,
        }
    }

    pub fn from_infrastructure(infra: &Infrastructure, metrics: Option<MetricsRecorder>) -> Self {
        let config = infra.config();
        Self {
            service_name: config.app_name.clone(),
            expose_error_detail: config.expose_error_detail(),
            metrics,
            ..Self::from_service(
                ProductService::new(infra.store()).with_operation_timeout(Duration::from_secs(
                    config.store.operation_timeout_secs,
                )),
            )
        }
    }

    pub fn with_error_detail(mut self, expose: bool) -> Self {
        self.expose_error_detail = expose;
        self
    }

    /// 按当前策略把应用错误转换为 HTTP 错误
    pub fn error(&self, err: AppError) -> ApiError {
        ApiError::new(err, self.expose_error_detail)
    }
}
