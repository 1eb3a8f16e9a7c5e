pub mod config;
pub mod error;
pub mod handlers;
pub mod runner;

pub use config::{WorkerAppConfig, WorkerConfig};
pub use error::{Result, WorkerError};
