//! products-adapter-mongodb - MongoDB 适配器

mod config;
mod connection;
mod product_store;

pub use config::*;
pub use connection::*;
pub use product_store::*;
