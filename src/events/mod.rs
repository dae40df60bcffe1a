//! Event handler system.
//!
//! Two entry points, both limited to group and supergroup chats:
//! - chat member updates (join welcomes)
//! - messages (first-message welcomes and link enforcement)

pub mod welcome;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{Chat, MessageEntity};
use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::moderation::{InboundMessage, Sender, SenderUser};

/// Build the combined event handler for chat member updates.
pub fn event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::entry().branch(welcome::handler())
}

/// Build the message event handler.
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| is_group_chat(&msg.chat)).endpoint(message_handler)
}

pub(crate) fn is_group_chat(chat: &Chat) -> bool {
    chat.is_group() || chat.is_supergroup()
}

async fn message_handler(msg: Message, state: AppState) -> anyhow::Result<()> {
    let inbound = inbound_message(&msg);

    debug!(
        "message_handler: chat={}, message={}, sender={:?}",
        inbound.chat_id, inbound.message_id.0, inbound.sender
    );

    state.moderator.on_message(&inbound).await;
    Ok(())
}

/// Reduce a teloxide message to the fields moderation looks at.
pub fn inbound_message(msg: &Message) -> InboundMessage {
    let sender = if msg.sender_chat.is_some() {
        Sender::Channel
    } else if let Some(user) = msg.from.as_ref() {
        Sender::User(sender_user(user))
    } else {
        Sender::Unknown
    };

    let entities = msg
        .entities()
        .into_iter()
        .chain(msg.caption_entities())
        .flatten()
        .map(|entity: &MessageEntity| entity.kind.clone())
        .collect();

    InboundMessage {
        chat_id: msg.chat.id,
        message_id: msg.id,
        sender,
        text: msg.text().map(str::to_string),
        caption: msg.caption().map(str::to_string),
        entities,
    }
}

pub(crate) fn sender_user(user: &teloxide::types::User) -> SenderUser {
    SenderUser {
        id: user.id,
        full_name: user.full_name(),
        username: user.username.clone(),
    }
}
