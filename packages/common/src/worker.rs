use serde::{Deserialize, Serialize};

/// Task envelope carried on the queue between producers and the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub task_type: String,
    pub payload: serde_json::Value,
}
