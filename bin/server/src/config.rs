use board_core::database::{DatabaseConfig, DatabaseType};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration
///
/// Values come from, lowest priority first: built-in defaults, an optional
/// `board.toml` in the working directory, then `BOARD_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Storage backend (`sqlite` or `memory`)
    #[serde(default = "default_database_type")]
    pub database_type: DatabaseType,

    /// SQLite connection URI
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub database_pool_size: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_timeout_seconds")]
    pub database_timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_type() -> DatabaseType {
    DatabaseType::Sqlite
}

fn default_database_url() -> String {
    "sqlite://board.db".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Settings {
    /// Load settings from the config file and environment variables
    pub fn load() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_environment(Environment::with_prefix("BOARD"))
    }

    fn from_environment(environment: Environment) -> Result<Self, anyhow::Error> {
        let settings = Config::builder()
            .add_source(File::with_name("board").required(false))
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        Ok(settings)
    }

    /// Get the server address as a string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Storage configuration for the core repository factory
    pub fn database_config(&self) -> DatabaseConfig {
        match self.database_type {
            DatabaseType::Sqlite => DatabaseConfig::sqlite(self.database_url.clone())
                .with_pool_size(self.database_pool_size)
                .with_timeout(self.database_timeout_seconds),
            DatabaseType::Memory => DatabaseConfig::memory(),
        }
    }
}
