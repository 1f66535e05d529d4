//! API 层

mod error;
pub mod http;

pub use error::*;
