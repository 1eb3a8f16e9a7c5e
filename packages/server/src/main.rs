use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connected");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.parser.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    info!(parser_url = %config.parser.url, "Forwarding parse requests");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db: db.clone(),
        http,
        config,
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown::shutdown_signal())
        .await?;

    db.close().await.context("Failed to close database pool")?;
    info!("Server stopped");

    Ok(())
}
