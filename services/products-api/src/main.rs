//! products-api 服务入口

use products_api::{api::http::build_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    products_bootstrap::run(&config_dir, |infra, metrics| {
        let state = AppState::from_infrastructure(infra, metrics);
        build_app(state, &infra.config().http)
    })
    .await
}
