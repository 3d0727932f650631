use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gametracker_server::config::AppConfig;
use gametracker_server::database::{ensure_indexes, init_db};
use gametracker_server::repository::Storage;
use gametracker_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let storage = match config.database.url.as_deref() {
        Some(url) => {
            let db = init_db(url).await.context("Failed to connect to database")?;
            ensure_indexes(&db)
                .await
                .context("Failed to create database indexes")?;
            info!("Using SQL storage");
            Storage::sql(db)
        }
        None => {
            info!("No database configured, keeping records in memory");
            Storage::in_memory()
        }
    };

    let app = gametracker_server::build_router(AppState::new(storage), &config.server.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
