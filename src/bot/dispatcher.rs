//! Message dispatcher setup.
//!
//! Builds the dispatcher with the member-update and message handlers.

use teloxide::adaptors::Throttle;
use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::events;
use crate::moderation::Moderator;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

pub type BotDispatcher = Dispatcher<ThrottledBot, anyhow::Error, DefaultKey>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Welcome tracking, link enforcement and pending timers.
    pub moderator: Moderator<ThrottledBot>,
}

impl AppState {
    pub fn new(bot: ThrottledBot, config: &Config) -> Self {
        Self {
            moderator: Moderator::from_config(bot, config),
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(bot: ThrottledBot, config: &Config) -> BotDispatcher {
    let state = AppState::new(bot.clone(), config);

    debug!(
        "Moderation settings: mute={:?}, warning={:?}, photo={}",
        state.moderator.settings().mute_duration,
        state.moderator.settings().warning_lifetime,
        state.moderator.settings().welcome_photo_url.is_some()
    );

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            debug!("Ignoring update {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    let message_handler = Update::filter_message().branch(events::message_event_handler());

    // Chat member events (welcome new members)
    let member_handler = Update::filter_chat_member().branch(events::event_handler());

    dptree::entry()
        .branch(message_handler)
        .branch(member_handler)
}
