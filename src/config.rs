//! Application configuration.
//!
//! The base URL and session key were module-level constants in earlier
//! revisions; they are now carried in an explicit `Config` handed to the
//! fetch and persistence constructors, scoped to the application session.

use anyhow::{Context, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analytics backend, e.g. "http://localhost:5000".
    pub base_url: String,
    /// Well-known key the session blob is stored under.
    pub storage_key: String,
    /// SQLite file backing the session store.
    pub sqlite_path: String,
    /// Ticker the driver fetches on startup.
    pub ticker: String,
}

impl Config {
    pub fn new(base_url: &str, storage_key: &str, sqlite_path: &str, ticker: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            storage_key: storage_key.to_string(),
            sqlite_path: sqlite_path.to_string(),
            ticker: ticker.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BACKEND_BASE").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            storage_key: std::env::var("STORAGE_KEY").unwrap_or_else(|_| "volatilityData".to_string()),
            sqlite_path: std::env::var("SQLITE_PATH").unwrap_or_else(|_| "./session.sqlite".to_string()),
            ticker: std::env::var("TICKER").unwrap_or_else(|_| "PH".to_string()),
        }
    }

    /// Resolve an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base URL: {}", self.base_url))?;
        base.join(path)
            .with_context(|| format!("invalid endpoint path: {}", path))
    }
}
