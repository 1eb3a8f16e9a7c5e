pub use broccoli_queue::{
    brokers::broker::BrokerMessage, error::BroccoliError, queue::BroccoliQueue,
};
use common::ParseJob;
use common::config::MqAppConfig;
use tracing::info;

use crate::error::MqError;

pub type MqQueue = BroccoliQueue;

pub struct MqConfig {
    pub url: String,
    pub pool_size: u8,
}

impl From<&MqAppConfig> for MqConfig {
    fn from(config: &MqAppConfig) -> Self {
        Self {
            url: config.url.clone(),
            pool_size: config.pool_size,
        }
    }
}

pub async fn init_mq(config: MqConfig) -> Result<MqQueue, MqError> {
    BroccoliQueue::builder(&config.url)
        .pool_connections(config.pool_size)
        .build()
        .await
        .map_err(MqError::from)
}

/// Publish a parse job onto `queue` wrapped in a task envelope.
pub async fn publish_parse_job(mq: &MqQueue, queue: &str, job: ParseJob) -> Result<(), MqError> {
    let job_id = job.job_id.clone();
    let url = job.url.clone();
    let task = job.into_task()?;

    mq.publish(queue, None, &task, None).await?;

    info!(job_id = %job_id, url = %url, queue, "Parse job enqueued");
    Ok(())
}
