//! products-adapter-memory - 进程内商品存储
//!
//! 用于本地开发和测试，ID 为自增十进制整数，与 PostgreSQL 适配器的 ID 形式一致

mod product_store;

pub use product_store::*;
