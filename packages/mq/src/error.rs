use broccoli_queue::error::BroccoliError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MqError {
    #[error("Failed to encode task: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Broker error: {0}")]
    Broker(String),
}

impl From<BroccoliError> for MqError {
    fn from(e: BroccoliError) -> Self {
        MqError::Broker(e.to_string())
    }
}
