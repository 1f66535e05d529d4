//! MongoDB 商品存储

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, options::ReturnDocument};
use products_domain::{NewProduct, Product, ProductId, ProductPatch};
use products_errors::{AppError, AppResult};
use products_ports::ProductStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MongoConfig;
use crate::connection::{check_connection, create_client};

/// 集合中的文档结构
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: ProductId::new(doc.id.to_hex()),
            name: doc.name,
            price: doc.price,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

/// 24 位十六进制 ObjectId
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// 构造更新管道的 `$set` 阶段
///
/// `name` 用 `$literal` 包裹，避免以 `$` 开头的名称被当作字段路径；
/// `updatedAt` 取服务器时间与上次值 + 1ms 中的较大者
fn update_stage(patch: &ProductPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", doc! { "$literal": name });
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    set.insert(
        "updatedAt",
        doc! { "$max": ["$$NOW", { "$add": ["$updatedAt", 1] }] },
    );
    doc! { "$set": set }
}

pub struct MongoProductStore {
    client: Client,
    database: Database,
    collection: Collection<ProductDocument>,
}

impl MongoProductStore {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection(collection);
        Self {
            client,
            database,
            collection,
        }
    }

    /// 创建客户端并做一次启动探测；探测失败只记录日志
    pub async fn connect(config: &MongoConfig) -> AppResult<Self> {
        let client = create_client(config).await?;
        let store = Self::new(client, &config.database, &config.collection);

        match check_connection(&store.database).await {
            Ok(()) => info!(database = %config.database, "MongoDB connection established"),
            Err(e) => warn!(error = %e, "MongoDB unreachable at startup"),
        }

        Ok(store)
    }

    fn object_id(id: &ProductId) -> Option<ObjectId> {
        ObjectId::parse_str(id.as_str()).ok()
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        is_object_id(id)
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let docs: Vec<ProductDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?
            .try_collect()
            .await
            .map_err(|e| AppError::database(format!("Failed to read products: {}", e)))?;

        Ok(docs.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(None);
        };

        let doc = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(doc.map(Product::from))
    }

    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        let now = bson::DateTime::now();
        let doc = ProductDocument {
            id: ObjectId::new(),
            name: product.name.clone(),
            price: product.price,
            created_at: now,
            updated_at: now,
        };

        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        debug!(id = %doc.id, "Inserted product");
        Ok(doc.into())
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> AppResult<Option<Product>> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(None);
        };

        let doc = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, vec![update_stage(patch)])
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        Ok(doc.map(Product::from))
    }

    async fn delete_by_id(&self, id: &ProductId) -> AppResult<Option<ProductId>> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(None);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        Ok((result.deleted_count > 0).then(|| ProductId::new(oid.to_hex())))
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(&self.database).await
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_check() {
        assert!(is_object_id("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(is_object_id("65A1F0C2E4B0A1B2C3D4E5F6"));
        assert!(!is_object_id("65a1f0c2e4b0a1b2c3d4e5f"));
        assert!(!is_object_id("65a1f0c2e4b0a1b2c3d4e5fg"));
        assert!(!is_object_id("1"));
        assert!(!is_object_id(""));
    }

    #[test]
    fn test_generated_ids_pass_check() {
        assert!(is_object_id(&ObjectId::new().to_hex()));
    }

    #[test]
    fn test_document_conversion() {
        let id = ObjectId::new();
        let now = bson::DateTime::now();
        let product = Product::from(ProductDocument {
            id,
            name: "Widget".to_string(),
            price: 9.99,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(product.id.as_str(), id.to_hex());
        assert_eq!(product.created_at, now.to_chrono());
    }

    #[test]
    fn test_update_stage_sets_only_supplied_fields() {
        let stage = update_stage(&ProductPatch {
            name: None,
            price: Some(12.5),
        });
        let set = stage.get_document("$set").unwrap();

        assert!(!set.contains_key("name"));
        assert_eq!(set.get_f64("price").unwrap(), 12.5);
        assert!(set.contains_key("updatedAt"));
    }

    #[test]
    fn test_update_stage_wraps_name_as_literal() {
        let stage = update_stage(&ProductPatch {
            name: Some("$price".to_string()),
            price: None,
        });
        let set = stage.get_document("$set").unwrap();
        let name = set.get_document("name").unwrap();

        assert_eq!(name.get_str("$literal").unwrap(), "$price");
        assert!(!set.contains_key("price"));
    }
}
