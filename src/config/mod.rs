//! Configuration module for Gatekeeper.
//!
//! Loads configuration from environment variables.

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use url::Url;

/// Admin user IDs that are always exempt from link enforcement.
pub const DEFAULT_ADMIN_IDS: &[u64] = &[5559869840];

/// How long a link warning stays in the chat before it's deleted.
pub const WARNING_LIFETIME: Duration = Duration::from_secs(10);

const DEFAULT_MUTE_SECONDS: u32 = 300;
const DEFAULT_PORT: u16 = 10000;

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is missing in .env or the hosting environment")]
    MissingToken,

    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("WELCOME_PHOTO_URL is not a valid URL: {0}")]
    InvalidPhotoUrl(#[from] url::ParseError),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    /// Image attached to welcome messages. `None` sends text-only welcomes.
    pub welcome_photo_url: Option<Url>,

    /// How long a link poster stays muted.
    pub mute_duration: Duration,

    /// How long the link warning stays visible.
    pub warning_lifetime: Duration,

    /// Users exempt from link enforcement in every chat.
    pub admin_ids: HashSet<u64>,

    // Keep-alive HTTP
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = var("BOT_TOKEN").ok_or(ConfigError::MissingToken)?;

        let welcome_photo_url = var("WELCOME_PHOTO_URL")
            .map(|raw| Url::parse(&raw))
            .transpose()?;

        let mute_seconds = match var("MUTE_SECONDS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                name: "MUTE_SECONDS",
                value: raw,
            })?,
            None => DEFAULT_MUTE_SECONDS,
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        // Extra admins are added on top of the built-in set
        let mut admin_ids: HashSet<u64> = DEFAULT_ADMIN_IDS.iter().copied().collect();
        admin_ids.extend(
            var("ADMIN_IDS")
                .unwrap_or_default()
                .split(',')
                .filter_map(|s| s.trim().parse::<u64>().ok()),
        );

        Ok(Self {
            bot_token,
            welcome_photo_url,
            mute_duration: Duration::from_secs(u64::from(mute_seconds)),
            warning_lifetime: WARNING_LIFETIME,
            admin_ids,
            port,
        })
    }
}
