//! API service configuration.

use std::env;

/// Configuration for the HTTP service.
///
/// Environment variables:
/// - `JOURNAL_ADDR` - Listen address (default: 127.0.0.1:8686)
/// - `SQLITE_PATH` - SQLite database URL (default: sqlite:journal.db?mode=rwc)
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address.
    pub addr: String,
    /// SQLite database URL.
    pub database_url: String,
}

impl Config {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let addr = env::var("JOURNAL_ADDR").unwrap_or_else(|_| "127.0.0.1:8686".to_string());
        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:journal.db?mode=rwc".to_string());

        Self { addr, database_url }
    }
}
