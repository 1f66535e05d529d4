//! 基于 BTreeMap 的 ProductStore 实现

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use products_domain::{NewProduct, Product, ProductId, ProductPatch, is_serial_id, next_updated_at};
use products_errors::AppResult;
use products_ports::ProductStore;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Inner {
    next_id: u64,
    products: BTreeMap<u64, Product>,
}

/// 内存商品存储
#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &ProductId) -> Option<u64> {
        id.as_str().parse().ok()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_serial_id(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let Some(key) = Self::parse_id(id) else {
            return Ok(None);
        };
        let inner = self.inner.read().await;
        Ok(inner.products.get(&key).cloned())
    }

    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let key = inner.next_id;

        let now = Utc::now();
        let created = Product {
            id: ProductId::new(key.to_string()),
            name: product.name.clone(),
            price: product.price,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(key, created.clone());

        debug!(id = key, "Inserted product");
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> AppResult<Option<Product>> {
        let Some(key) = Self::parse_id(id) else {
            return Ok(None);
        };
        let mut inner = self.inner.write().await;
        let Some(product) = inner.products.get_mut(&key) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        product.updated_at = next_updated_at(product.updated_at, Utc::now());

        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: &ProductId) -> AppResult<Option<ProductId>> {
        let Some(key) = Self::parse_id(id) else {
            return Ok(None);
        };
        let mut inner = self.inner.write().await;
        Ok(inner.products.remove(&key).map(|product| product.id))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
