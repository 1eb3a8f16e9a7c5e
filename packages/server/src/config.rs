use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::{CorsConfig, DatabaseConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// Location of the parser service the parse endpoints forward to.
#[derive(Debug, Deserialize, Clone)]
pub struct ParserServiceConfig {
    pub url: String,
    /// Whole-request timeout for forwarded calls. Default: 60.
    #[serde(default = "default_parser_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_parser_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub parser: ParserServiceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8001)?
            .set_default("server.cors.allow_origins", vec!["http://localhost:8000"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("parser.url", "http://localhost:8000")?
            .add_source(File::with_name(&common::config::config_path()).required(false))
            // Override from environment (e.g., HACKATHON__PARSER__URL)
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

    /// Base URL of the parser service without a trailing slash.
    pub fn parser_base_url(&self) -> &str {
        self.parser.url.trim_end_matches('/')
    }
}
