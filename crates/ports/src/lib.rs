//! ports - 抽象 trait 层
//!
//! 定义商品存储的抽象接口，具体实现见 adapters

mod product_store;

pub use product_store::*;
