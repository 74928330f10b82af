use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Contains parameters for the entry store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL. Falls back to the `DATABASE_URL` environment variable.
    pub url: Option<String>,
    pub max_connections: u32,
    /// How long to wait for a pooled connection before failing a request.
    pub acquire_timeout_secs: u64,
    /// Keep entries in process memory instead of PostgreSQL.
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,sqlx=warn`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if !self.database.in_memory && self.database.url.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::ValidationError(
                "database.url (or DATABASE_URL) must be set unless database.in_memory is enabled"
                    .to_string(),
            ));
        }
        if self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
