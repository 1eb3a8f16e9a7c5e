use std::sync::Arc;

use mq::Mq;
use sea_orm::DatabaseConnection;

use crate::config::ParserAppConfig;
use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub pipeline: Arc<Pipeline>,
    /// `None` when MQ is disabled or the broker was unreachable at startup.
    pub mq: Option<Arc<Mq>>,
    pub config: ParserAppConfig,
}
