//! products-bootstrap - 服务启动骨架
//!
//! 配置加载、日志初始化、存储创建、HTTP 服务与 graceful shutdown

mod infrastructure;
mod metrics;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use metrics::*;
pub use runtime::*;
pub use starter::*;
