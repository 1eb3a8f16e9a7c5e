use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Client used to forward parse requests to the parser service.
    pub http: reqwest::Client,
    pub config: AppConfig,
}
