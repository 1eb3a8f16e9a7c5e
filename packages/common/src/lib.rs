pub mod config;
pub mod cors;
pub mod parse_job;
pub mod shutdown;
pub mod worker;

pub use parse_job::{PARSE_TASK_TYPE, ParseJob};
pub use worker::Task;
