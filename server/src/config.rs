//! Server configuration module.
//!
//! Parses configuration from environment variables for the TicketsMaster server.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `PORT` | No | 3000 | HTTP server port |
//! | `TICKETSMASTER_JWT_SECRET` | No | built-in dev secret | Token signing secret |
//! | `TICKETSMASTER_MONGODB_URI` | No | `mongodb://localhost:27017/ticketsmaster` | Document store connection string |
//!
//! Every variable has a hardcoded fallback so the server starts with no
//! environment at all; a warning is logged when the built-in signing secret
//! is in use.

use std::env;

use thiserror::Error;
use tracing::warn;

/// Default HTTP server port.
const DEFAULT_PORT: u16 = 3000;

/// Fallback token-signing secret used when none is configured.
const DEFAULT_JWT_SECRET: &str = "ticketsmaster-secret-key";

/// Fallback document-store connection string.
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/ticketsmaster";

/// Lifetime of issued session tokens, in seconds (24 hours).
pub const TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable has invalid format.
    #[error("invalid format for {var}: {message}")]
    InvalidFormat { var: String, message: String },

    /// Port number is invalid.
    #[error("invalid port number: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,

    /// Secret used to sign and verify session tokens.
    pub jwt_secret: String,

    /// Connection string for the MongoDB document store.
    pub mongodb_uri: String,
}

impl Config {
    /// Parse configuration from environment variables.
    ///
    /// All variables fall back to hardcoded defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PORT` is set but is not a valid u16, or a
    /// variable contains invalid unicode.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ticketsmaster_server::config::Config;
    ///
    /// let config = Config::from_env().expect("Failed to load config");
    /// println!("Server will listen on port {}", config.port);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port()?;
        let jwt_secret = parse_string_env("TICKETSMASTER_JWT_SECRET", DEFAULT_JWT_SECRET)?;
        let mongodb_uri = parse_string_env("TICKETSMASTER_MONGODB_URI", DEFAULT_MONGODB_URI)?;

        if jwt_secret == DEFAULT_JWT_SECRET {
            warn!(
                "TICKETSMASTER_JWT_SECRET is unset - using the built-in development secret. \
                 Do not use in production!"
            );
        }

        Ok(Self {
            port,
            jwt_secret,
            mongodb_uri,
        })
    }

    /// Creates a configuration with explicit values, bypassing the environment.
    ///
    /// Useful for tests and embedded setups.
    #[must_use]
    pub fn with_values(port: u16, jwt_secret: impl Into<String>, mongodb_uri: impl Into<String>) -> Self {
        Self {
            port,
            jwt_secret: jwt_secret.into(),
            mongodb_uri: mongodb_uri.into(),
        }
    }
}

/// Parse the PORT environment variable.
///
/// Returns the default port if not set.
fn parse_port() -> Result<u16, ConfigError> {
    match env::var("PORT") {
        Ok(port_str) => Ok(port_str.parse()?),
        Err(env::VarError::NotPresent) => Ok(DEFAULT_PORT),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidFormat {
            var: "PORT".to_string(),
            message: "contains invalid unicode".to_string(),
        }),
    }
}

/// Parse a string environment variable with a fallback default.
fn parse_string_env(name: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidFormat {
            var: name.to_string(),
            message: "contains invalid unicode".to_string(),
        }),
    }
}
