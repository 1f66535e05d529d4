//! PostgreSQL 商品存储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use products_domain::{NewProduct, Product, ProductId, ProductPatch, is_serial_id};
use products_errors::{AppError, AppResult};
use products_ports::ProductStore;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::config::PostgresConfig;
use crate::connection::{check_connection, create_pool};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id.to_string()),
            name: row.name,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建连接池并做一次启动探测；探测失败只记录日志
    pub async fn connect(config: &PostgresConfig) -> AppResult<Self> {
        let pool = create_pool(config)?;

        match check_connection(&pool).await {
            Ok(()) => info!("PostgreSQL connection established"),
            Err(e) => warn!(error = %e, "PostgreSQL unreachable at startup"),
        }

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn key(id: &ProductId) -> Option<i64> {
        id.as_str().parse().ok()
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_serial_id(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, created_at, updated_at FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> AppResult<Option<Product>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        // updated_at 必须严格递增，时钟回拨时退化为上次值 + 1µs
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                price = COALESCE($2, price),
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $3
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn delete_by_id(&self, id: &ProductId) -> AppResult<Option<ProductId>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM products WHERE id = $1 RETURNING id")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        Ok(deleted.map(|id| ProductId::new(id.to_string())))
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(&self.pool).await
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}
