//! Receipt API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::time::Duration;

use receipt_db::pool::IN_MEMORY_PATH;
use receipt_db::DbConfig;

/// Receipt API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// SQLite database file, or `:memory:`
    pub database_uri: String,

    /// HTTP listen host
    pub http_host: String,

    /// HTTP listen port
    pub http_port: u16,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Pool acquire timeout, in seconds
    pub db_connect_timeout_secs: u64,

    /// Idle connection lifetime, in seconds (file databases only)
    pub db_idle_timeout_secs: u64,

    /// Bound on every storage call, in seconds
    pub operation_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            database_uri: "./receipts.db".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 4000,
            db_max_connections: 5,
            db_connect_timeout_secs: 30,
            db_idle_timeout_secs: 600,
            operation_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            database_uri: lookup("RECEIPTDB_URI").unwrap_or(defaults.database_uri),

            http_host: lookup("HTTP_HOST").unwrap_or(defaults.http_host),

            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            db_connect_timeout_secs: parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.db_connect_timeout_secs,
            )?,

            db_idle_timeout_secs: parse_or(
                &lookup,
                "DB_IDLE_TIMEOUT_SECS",
                defaults.db_idle_timeout_secs,
            )?,

            operation_timeout_secs: parse_or(
                &lookup,
                "OPERATION_TIMEOUT_SECS",
                defaults.operation_timeout_secs,
            )?,
        };

        if config.database_uri.trim().is_empty() {
            return Err(ConfigError::MissingRequired("RECEIPTDB_URI".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.db_connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("DB_CONNECT_TIMEOUT_SECS".to_string()));
        }
        if config.operation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("OPERATION_TIMEOUT_SECS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = if self.database_uri == IN_MEMORY_PATH {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_uri).max_connections(self.db_max_connections)
        };
        config
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.db_idle_timeout_secs))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
