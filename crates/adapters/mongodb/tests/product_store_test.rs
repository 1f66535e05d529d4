//! MongoDB 商品存储集成测试
//!
//! 需要可用的 MongoDB：设置 `PRODUCTS_TEST_MONGODB_URL` 后运行，未设置时跳过

use std::env;

use products_adapter_mongodb::{MongoConfig, MongoProductStore};
use products_domain::{NewProduct, ProductId, ProductPatch};
use products_ports::ProductStore;

async fn setup(collection: &str) -> Option<MongoProductStore> {
    let url = env::var("PRODUCTS_TEST_MONGODB_URL").ok()?;
    let config = MongoConfig::new(url)
        .with_database("products_it")
        .with_collection(collection);
    let store = MongoProductStore::connect(&config).await.ok()?;

    for product in store.find_all().await.ok()? {
        store.delete_by_id(&product.id).await.ok()?;
    }
    Some(store)
}

#[tokio::test]
async fn test_crud_round_trip() {
    let Some(store) = setup("crud").await else {
        println!("PRODUCTS_TEST_MONGODB_URL not set, skipping");
        return;
    };

    store.ping().await.unwrap();

    let created = store
        .insert(&NewProduct::new("Widget", 9.99).unwrap())
        .await
        .unwrap();
    assert!(store.is_valid_id(created.id.as_str()));

    let found = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Widget");

    let patch = ProductPatch {
        name: None,
        price: Some(12.5),
    };
    let updated = store.update_by_id(&created.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.price, 12.5);
    assert!(updated.updated_at > created.updated_at);

    // 大写十六进制同样可定位，返回值为规范的小写形式
    let uppercase = ProductId::new(created.id.as_str().to_uppercase());
    assert_eq!(
        store.delete_by_id(&uppercase).await.unwrap(),
        Some(created.id.clone())
    );
    assert!(store.find_by_id(&created.id).await.unwrap().is_none());

    store.close().await;
}

#[tokio::test]
async fn test_missing_id_and_ordering() {
    let Some(store) = setup("ordering").await else {
        println!("PRODUCTS_TEST_MONGODB_URL not set, skipping");
        return;
    };

    let missing = ProductId::new("65a1f0c2e4b0a1b2c3d4e5f6");
    assert!(store.find_by_id(&missing).await.unwrap().is_none());
    assert!(store.delete_by_id(&missing).await.unwrap().is_none());

    for name in ["b", "a", "c"] {
        store
            .insert(&NewProduct::new(name, 1.0).unwrap())
            .await
            .unwrap();
    }
    let ids: Vec<String> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id.to_string())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);

    store.close().await;
}
