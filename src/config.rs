//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present, so
//! local runs only need to drop the tokens there.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default Garmin Connect API host.
pub const DEFAULT_GARMIN_API_BASE: &str = "https://connectapi.garmin.com";

/// Default Notion API base URL.
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Upper bound on activities fetched in a single run.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 1000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Garmin (source) ---
    /// Bearer token for Garmin Connect, issued by an external login step
    pub garmin_access_token: String,
    /// Garmin Connect API base URL
    pub garmin_api_base: String,
    /// Maximum number of activities to fetch
    pub activity_limit: u32,

    // --- Notion (destination) ---
    /// Notion integration token
    pub notion_token: String,
    /// Target database ID
    pub notion_database_id: String,
    /// Notion API base URL
    pub notion_api_base: String,

    // --- Sync behaviour ---
    /// Run the Garmin ID backfill pass before reconciling
    pub backfill_enabled: bool,
    /// Minimum spacing between backfill writes
    pub backfill_write_interval: Duration,
    /// Attempts per HTTP call, including the first
    pub retry_max_attempts: u32,
    /// Backoff before the first retry
    pub retry_initial_delay: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            garmin_access_token: "test_garmin_token".to_string(),
            garmin_api_base: DEFAULT_GARMIN_API_BASE.to_string(),
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
            notion_token: "test_notion_token".to_string(),
            notion_database_id: "test-database".to_string(),
            notion_api_base: DEFAULT_NOTION_API_BASE.to_string(),
            backfill_enabled: true,
            backfill_write_interval: Duration::ZERO,
            retry_max_attempts: 1,
            retry_initial_delay: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            garmin_access_token: required_secret("GARMIN_ACCESS_TOKEN")?,
            garmin_api_base: env::var("GARMIN_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GARMIN_API_BASE.to_string()),
            activity_limit: parse_or("SYNC_ACTIVITY_LIMIT", DEFAULT_ACTIVITY_LIMIT)?,

            notion_token: required_secret("NOTION_TOKEN")?,
            notion_database_id: required_secret("NOTION_DB_ID")?,
            notion_api_base: env::var("NOTION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_NOTION_API_BASE.to_string()),

            backfill_enabled: parse_or("BACKFILL_ENABLED", true)?,
            backfill_write_interval: Duration::from_millis(parse_or(
                "BACKFILL_WRITE_INTERVAL_MS",
                200,
            )?),
            retry_max_attempts: parse_or("RETRY_MAX_ATTEMPTS", 3)?,
            retry_initial_delay: Duration::from_millis(parse_or("RETRY_INITIAL_DELAY_MS", 500)?),
        })
    }
}

fn required_secret(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
