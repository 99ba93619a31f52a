//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first when
//! present; real environment variables win over it.

use serde::{Deserialize, Serialize};
use std::env;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub server_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Connection pool size
    pub database_max_connections: u32,

    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: i64,
}

impl ApiConfig {
    /// Load configuration from `.env` (if any) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is normal in production
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Load configuration from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            server_port: get("SERVER_PORT", "8081")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,

            database_path: get("DATABASE_PATH", "playtowin.db"),

            database_max_connections: get("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,

            access_secret: get("ACCESS_SECRET", ""),

            refresh_secret: get("REFRESH_SECRET", ""),

            access_token_ttl_secs: get("ACCESS_TOKEN_TTL_SECS", "86400") // 24 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ACCESS_TOKEN_TTL_SECS".to_string()))?,

            refresh_token_ttl_secs: get("REFRESH_TOKEN_TTL_SECS", "604800") // 7 days
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REFRESH_TOKEN_TTL_SECS".to_string()))?,
        };

        if config.access_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("ACCESS_SECRET".to_string()));
        }
        if config.refresh_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("REFRESH_SECRET".to_string()));
        }
        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()));
        }
        if config.access_token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue("ACCESS_TOKEN_TTL_SECS".to_string()));
        }
        if config.refresh_token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue("REFRESH_TOKEN_TTL_SECS".to_string()));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
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
