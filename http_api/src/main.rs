use std::sync::Arc;

use anyhow::Context;
use config::AppConfig;
use http_api::observability::init_tracing_with_level;
use http_api::{build_app, AppState};
use mothhaus::MothHaus;
use store_object::schema::moths_schema;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing_with_level(&config.logging.level);

    let mothhaus = MothHaus::new(config.database.clone())
        .await
        .context("failed to connect to database")?;
    let schema = moths_schema();
    mothhaus.auto_migrate(&schema).await?;

    let store = Arc::new(mothhaus.store(schema.clone()));
    let app = build_app(AppState::new(store, schema));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(%address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
