//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use directory_client::{DirectoryConfig, DirectoryError};

/// Sync API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Remote directory settings.
    pub directory: DirectoryConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SYNC_API_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:contacts.db?mode=rwc` |
    /// | `DIRECTORY_API_URL` | Directory base URL | `https://dummyjson.com` |
    /// | `DIRECTORY_TIMEOUT_SECS` | Directory request timeout | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("SYNC_API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:contacts.db?mode=rwc".to_string());

        let directory = DirectoryConfig::from_env()?;

        Ok(Self {
            addr,
            database_url,
            directory,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SYNC_API_ADDR format")]
    InvalidAddr,

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
