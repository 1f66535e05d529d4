//! products-api - 商品 CRUD 服务
//!
//! HTTP 路由 → [`application::ProductService`] → `ProductStore`

pub mod api;
pub mod application;
pub mod state;
