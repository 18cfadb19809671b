use std::sync::Arc;

use anyhow::Context;
use plant_diary::config::Config;
use plant_diary::provider::ProviderClient;
use plant_diary::routes;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(provider = ?config.provider, "configuration loaded");

    let analyzer = Arc::new(ProviderClient::new(config.provider));
    let app = routes::router(analyzer);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("could not bind {}", config.addr))?;

    tracing::info!("🌿 Plant diary running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
