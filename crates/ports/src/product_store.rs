//! ProductStore trait 定义

use async_trait::async_trait;
use products_domain::{NewProduct, Product, ProductId, ProductPatch};
use products_errors::AppResult;

/// 商品存储
///
/// 每个方法对应一次存储操作。失败以 `AppError::Database` 返回，实现不得 panic
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 后端名称（用于健康检查与 metrics 标签）
    fn backend(&self) -> &'static str;

    /// ID 格式检查，不访问存储
    fn is_valid_id(&self, id: &str) -> bool;

    /// 按 ID 升序返回全部商品
    async fn find_all(&self) -> AppResult<Vec<Product>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>>;

    /// 插入商品，由存储生成 ID 与时间戳
    async fn insert(&self, product: &NewProduct) -> AppResult<Product>;

    /// 部分更新，返回更新后的商品；ID 不存在时返回 `None`
    async fn update_by_id(&self, id: &ProductId, patch: &ProductPatch)
    -> AppResult<Option<Product>>;

    /// 删除商品，返回被删除记录的规范 ID；记录不存在时返回 `None`
    async fn delete_by_id(&self, id: &ProductId) -> AppResult<Option<ProductId>>;

    /// 轻量存活探测
    async fn ping(&self) -> AppResult<()>;

    /// 释放连接资源（进程退出前调用）
    async fn close(&self) {}
}
