use common::{PARSE_TASK_TYPE, ParseJob, Task};
use parser::pipeline::Pipeline;
use tracing::{info, instrument, warn};

use crate::error::Result;

/// What happened to a task taken off the queue.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The page was fetched and stored under this id.
    Stored(i32),
    /// The task was not a parse job and was left alone.
    Skipped,
}

#[instrument(skip_all, fields(task_id = %task.id, task_type = %task.task_type))]
pub async fn handle_task(pipeline: &Pipeline, task: Task) -> Result<TaskOutcome> {
    if task.task_type != PARSE_TASK_TYPE {
        warn!("Unknown task type, skipping");
        return Ok(TaskOutcome::Skipped);
    }

    let job: ParseJob = serde_json::from_value(task.payload)?;
    info!(job_id = %job.job_id, url = %job.url, "Processing parse job");

    let page = pipeline.run(&job.url).await?;
    Ok(TaskOutcome::Stored(page.id))
}
