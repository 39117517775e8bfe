//! Server configuration loaded from environment variables.
//!
//! Fail-fast: a missing or unparsable required value aborts startup with a
//! clear message rather than limping along with a guess.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8956;
const DEFAULT_DATABASE_URL: &str = "sqlite://user_operations.db";
const DEFAULT_TICKETS_DATABASE_URL: &str = "sqlite://tickets.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration for the dirops server.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Audit database (disabled accounts, action log).
    pub database_url: String,
    /// Ticketing database; deliberately separate from the audit store.
    pub tickets_database_url: String,
    /// Optional JSON file with connection profiles, loaded once at startup.
    pub credentials_file: Option<PathBuf>,
    /// Directory shell binary override.
    pub shell: Option<String>,
    /// Per-action directory shell timeout in seconds.
    pub action_timeout: Duration,
    /// Bulk-disable directory shell timeout in seconds.
    pub bulk_timeout: Duration,
    /// Default log filter when RUST_LOG is unset.
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("DIROPS_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "DIROPS_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: env::var("DIROPS_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            database_url: env::var("DIROPS_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            tickets_database_url: env::var("DIROPS_TICKETS_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_TICKETS_DATABASE_URL.to_string()),
            credentials_file: env::var("DIROPS_CREDENTIALS_FILE").ok().map(PathBuf::from),
            shell: env::var("DIROPS_SHELL").ok(),
            action_timeout: duration_var("DIROPS_ACTION_TIMEOUT_SECS", 30)?,
            bulk_timeout: duration_var("DIROPS_BULK_TIMEOUT_SECS", 60)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn duration_var(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}
