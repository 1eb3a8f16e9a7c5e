use parser::pipeline::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid task payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Parse job failed: {0}")]
    Pipeline(#[from] PipelineError),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
