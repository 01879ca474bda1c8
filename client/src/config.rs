//! Configuration module for the TicketsMaster client.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `TICKETSMASTER_API_URL` | No | `http://localhost:3000/api` | Base URL of the REST API |
//! | `TICKETSMASTER_SESSION_FILE` | No | `~/.ticketsmaster/session.json` | Persisted session location |

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Default base URL of the REST API.
const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Default session directory name relative to home.
const DEFAULT_SESSION_DIR: &str = ".ticketsmaster";

/// File name of the persisted session inside the session directory.
const SESSION_FILE_NAME: &str = "session.json";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for the TicketsMaster client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,

    /// Path of the persisted session file (the local-storage analog).
    pub session_file: PathBuf,
}

impl Config {
    /// Creates a `Config` from environment variables, falling back to the
    /// defaults above.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDirectory` when no session-file override
    /// is set and the home directory cannot be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("TICKETSMASTER_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();

        let session_file = match env::var("TICKETSMASTER_SESSION_FILE") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => {
                let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
                base_dirs
                    .home_dir()
                    .join(DEFAULT_SESSION_DIR)
                    .join(SESSION_FILE_NAME)
            }
        };

        Ok(Self {
            api_url,
            session_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars.push((key.to_string(), env::var(key).ok()));
            env::set_var(key, value);
        }

        fn remove(&mut self, key: &str) {
            self.vars.push((key.to_string(), env::var(key).ok()));
            env::remove_var(key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.vars {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_unset() {
        let mut guard = EnvGuard::new();
        guard.remove("TICKETSMASTER_API_URL");
        guard.remove("TICKETSMASTER_SESSION_FILE");

        let config = Config::from_env().expect("should parse config");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.session_file.ends_with(".ticketsmaster/session.json"));
    }

    #[test]
    #[serial]
    fn overrides_apply_and_trailing_slash_is_trimmed() {
        let mut guard = EnvGuard::new();
        guard.set("TICKETSMASTER_API_URL", "https://tickets.example.com/api/");
        guard.set("TICKETSMASTER_SESSION_FILE", "/tmp/tm-session.json");

        let config = Config::from_env().expect("should parse config");
        assert_eq!(config.api_url, "https://tickets.example.com/api");
        assert_eq!(config.session_file, PathBuf::from("/tmp/tm-session.json"));
    }
}
