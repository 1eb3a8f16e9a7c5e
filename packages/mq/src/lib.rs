pub mod error;
pub mod models;

pub use error::MqError;
pub use models::{BroccoliError, BrokerMessage, MqConfig, MqQueue, init_mq, publish_parse_job};

pub type Mq = MqQueue;
