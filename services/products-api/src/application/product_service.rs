//! 商品应用服务
//!
//! 每个操作：ID / 请求体校验 → 一次存储调用 → 结果映射。校验失败不会访问存储。
//! 存储调用超过 `operation_timeout` 按存储故障（500）处理

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use products_bootstrap::StoreTimer;
use products_domain::{NewProduct, Product, ProductId, ProductPatch, ProductPayload};
use products_errors::{AppError, AppResult};
use products_ports::ProductStore;
use tokio::time::timeout;
use tracing::{debug, error};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const INVALID_PRODUCT_ID: &str = "Invalid product id";
pub const STORE_TIMED_OUT: &str = "store operation timed out";

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ProductService {
    store: Arc<dyn ProductStore>,
    operation_timeout: Duration,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// 查询全部商品（按 ID 升序）
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        self.timed("find_all", self.store.find_all()).await
    }

    /// 根据 ID 查询
    pub async fn get(&self, raw_id: &str) -> AppResult<Product> {
        let id = self.parse_id(raw_id)?;
        self.timed("find_by_id", self.store.find_by_id(&id))
            .await?
            .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))
    }

    /// 创建商品
    pub async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let product = NewProduct::from_payload(payload)?;
        let created = self.timed("insert", self.store.insert(&product)).await?;
        debug!(id = %created.id, "Product created");
        Ok(created)
    }

    /// 部分更新：只修改请求中出现的字段
    pub async fn update(&self, raw_id: &str, payload: ProductPayload) -> AppResult<Product> {
        let id = self.parse_id(raw_id)?;
        let patch = ProductPatch::from_payload(payload)?;
        self.timed("update_by_id", self.store.update_by_id(&id, &patch))
            .await?
            .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))
    }

    /// 删除商品，返回存储中的规范 ID
    pub async fn delete(&self, raw_id: &str) -> AppResult<ProductId> {
        let id = self.parse_id(raw_id)?;
        let deleted = self
            .timed("delete_by_id", self.store.delete_by_id(&id))
            .await?
            .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))?;
        debug!(id = %deleted, "Product deleted");
        Ok(deleted)
    }

    /// 存储探测，返回耗时（毫秒）
    pub async fn check_store(&self) -> AppResult<u64> {
        let start = Instant::now();
        self.timed("ping", self.store.ping()).await?;
        Ok(start.elapsed().as_millis() as u64)
    }

    fn parse_id(&self, raw_id: &str) -> AppResult<ProductId> {
        if self.store.is_valid_id(raw_id) {
            Ok(ProductId::new(raw_id))
        } else {
            Err(AppError::validation(INVALID_PRODUCT_ID))
        }
    }

    async fn timed<T, F>(&self, operation: &'static str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let timer = StoreTimer::start(operation, self.store.backend());
        let result = timeout(self.operation_timeout, call)
            .await
            .unwrap_or_else(|_| Err(AppError::database(STORE_TIMED_OUT)));
        timer.finish(result.is_ok());

        if let Err(e) = &result {
            error!(operation, backend = self.store.backend(), error = %e, "Store operation failed");
        }
        result
    }
}
