use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use mq::{MqConfig, init_mq};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use parser::config::ParserAppConfig;
use parser::database::init_db;
use parser::fetch::HttpFetcher;
use parser::pipeline::Pipeline;
use parser::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ParserAppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connected");

    let mq = if config.mq.enabled {
        match init_mq(MqConfig::from(&config.mq)).await {
            Ok(mq) => {
                info!(queue_name = %config.mq.queue_name, "MQ connected");
                Some(Arc::new(mq))
            }
            Err(e) => {
                warn!(error = %e, "MQ unavailable, queued parsing disabled");
                None
            }
        }
    } else {
        info!("MQ disabled, queued parsing disabled");
        None
    };

    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;
    let pipeline = Arc::new(Pipeline::new(Arc::new(fetcher), db.clone()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db: db.clone(),
        pipeline,
        mq,
        config,
    };
    let app = parser::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Parser service running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown::shutdown_signal())
        .await?;

    db.close().await.context("Failed to close database pool")?;
    info!("Parser service stopped");

    Ok(())
}
