use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::{CorsConfig, DatabaseConfig, MqAppConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// Outbound fetch settings used by the pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout. Default: 30.
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent with every fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("hackathon-parser/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Parser service configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ParserAppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mq: MqAppConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl ParserAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", vec!["http://localhost:8001"])?
            .set_default("server.cors.max_age", 3600)?
            .add_source(File::with_name(&common::config::config_path()).required(false))
            // Override from environment (e.g., HACKATHON__DATABASE__URL)
            .add_source(
                Environment::with_prefix(common::config::ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
