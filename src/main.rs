//! Gatekeeper - Telegram group guard
//!
//! Welcomes new or first-time-posting members and mutes members who post
//! links without authorization.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `platform` - Telegram API seam (with Throttle for API rate limiting)
//! - `permissions` - Link exemption checks
//! - `moderation` - Welcome tracking, link detection, enforcement and timers
//! - `events` - Event handlers for member updates and messages
//! - `bot` - Dispatcher and polling runtime
//! - `server` - Keep-alive HTTP endpoint
//! - `utils` - Utility functions

mod bot;
mod config;
mod events;
mod moderation;
mod permissions;
mod platform;
mod server;
mod utils;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gatekeeper=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Gatekeeper bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!(
        "Mute duration: {}s, warning lifetime: {}s",
        config.mute_duration.as_secs(),
        config.warning_lifetime.as_secs()
    );
    info!("Admin IDs: {:?}", config.admin_ids);

    // Throttle respects Telegram's per-chat and global rate limits
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let dispatcher = bot::build_dispatcher(bot.clone(), &config);

    server::run(config.port, bot::run(bot, dispatcher)).await
}
