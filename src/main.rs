mod api_doc;
mod config;
mod envelope;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;
mod validation;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;
use store::RecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sku_warehouse=info,tower_http=info")),
        )
        .init();

    tracing::info!("sku-warehouse starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = RecordStore::from_config(&config).await?;
    let app = routes::router(AppState { store });

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("API docs at http://{}{}", addr, routes::SWAGGER_UI);

    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
