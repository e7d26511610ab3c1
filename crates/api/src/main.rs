use anyhow::Context;

use movies_api::app::{self, services::AppServices};
use movies_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    movies_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = AppServices::from_config(&config).context("failed to seed movie store")?;
    let app = app::build_app(&config, services);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
