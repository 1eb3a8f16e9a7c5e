use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::worker::Task;

/// `task_type` of tasks carrying a [`ParseJob`].
pub const PARSE_TASK_TYPE: &str = "parse";

/// A request to fetch a URL, extract its metadata and store it as a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParseJob {
    /// Job identifier (UUIDv7)
    pub job_id: String,
    /// Address of the document to fetch
    pub url: String,
    /// When the job was accepted by the parser service
    pub requested_at: DateTime<Utc>,
}

impl ParseJob {
    /// Create a new parse job with a generated UUID.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            job_id: Uuid::now_v7().to_string(),
            url: url.into(),
            requested_at: Utc::now(),
        }
    }

    /// Wrap the job into a queue task envelope.
    pub fn into_task(self) -> Result<Task, serde_json::Error> {
        Ok(Task {
            id: self.job_id.clone(),
            task_type: PARSE_TASK_TYPE.into(),
            payload: serde_json::to_value(&self)?,
        })
    }
}
