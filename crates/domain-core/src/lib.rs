//! products-domain - 商品领域模型
//!
//! Product 实体，以及创建/更新时的校验与规范化规则

mod product;
mod schema;

pub use product::*;
pub use schema::*;
