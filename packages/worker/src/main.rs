use std::sync::Arc;

use anyhow::Context;
use common::worker::Task;
use mq::{BroccoliError, BrokerMessage, MqConfig, init_mq};
use parser::database::init_db;
use parser::fetch::HttpFetcher;
use parser::pipeline::Pipeline;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use worker::WorkerAppConfig;
use worker::handlers::parse::{TaskOutcome, handle_task};
use worker::runner::run_until_shutdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WorkerAppConfig::load().context("Failed to load config")?;
    info!("Worker starting: {}", config.worker.id);

    let db = init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;

    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;
    let pipeline = Arc::new(Pipeline::new(Arc::new(fetcher), db.clone()));

    let mq = init_mq(MqConfig::from(&config.mq))
        .await
        .context("Failed to initialize MQ")?;
    info!(
        queue_name = %config.mq.queue_name,
        concurrency = config.worker.concurrency,
        "MQ connected"
    );

    let consume = mq.process_messages(
        &config.mq.queue_name,
        Some(config.worker.concurrency),
        None,
        move |message: BrokerMessage<Task>| {
            let pipeline = Arc::clone(&pipeline);
            async move { process_message(message, &pipeline).await }
        },
    );

    run_until_shutdown(consume, common::shutdown::shutdown_signal()).await;

    db.close().await.context("Failed to close database pool")?;
    info!("Worker stopped");
    Ok(())
}

/// Failed jobs are logged and acknowledged; they are not retried.
async fn process_message(
    message: BrokerMessage<Task>,
    pipeline: &Pipeline,
) -> Result<(), BroccoliError> {
    let task_id = message.payload.id.clone();

    match handle_task(pipeline, message.payload).await {
        Ok(TaskOutcome::Stored(page_id)) => info!(task_id = %task_id, page_id, "Parse job done"),
        Ok(TaskOutcome::Skipped) => {}
        Err(e) => error!(task_id = %task_id, error = %e, "Parse job failed"),
    }

    Ok(())
}
