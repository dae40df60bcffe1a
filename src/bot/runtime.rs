//! Bot runtime - long polling.

use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use teloxide::update_listeners::Polling;
use tracing::info;

use super::dispatcher::{BotDispatcher, ThrottledBot};

/// Run the receive loop until shutdown.
///
/// `chat_member` updates are only delivered when requested explicitly.
pub async fn run(bot: ThrottledBot, mut dispatcher: BotDispatcher) {
    info!("Starting bot in polling mode...");

    let listener = Polling::builder(bot)
        .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::ChatMember])
        .build();

    let error_handler = LoggingErrorHandler::with_custom_text("Error from update listener");

    dispatcher
        .dispatch_with_listener(listener, error_handler)
        .await;

    info!("Bot receive loop stopped");
}
