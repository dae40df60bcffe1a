//! Moderation core.
//!
//! [`Moderator`] is the context object handed to every handler. It owns the
//! welcome tracker and the timer registry, so each instance (one per bot, or
//! one per test) has fully isolated state.
//!
//! ## Flow
//!
//! - Join event: greet the member once.
//! - Message: greet the sender once, then check for links, exemptions and
//!   finally enforce.

pub mod enforcement;
pub mod greeter;
pub mod links;
pub mod timers;
pub mod tracker;

use std::sync::Arc;
use std::time::Duration;

use teloxide::types::{ChatId, MessageEntityKind, MessageId, UserId};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::permissions::SenderPolicy;
use crate::platform::ChatApi;

pub use timers::TimerRegistry;
pub use tracker::WelcomeTracker;

/// An individual account that sent a message or joined a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderUser {
    pub id: UserId,
    pub full_name: String,
    pub username: Option<String>,
}

/// Who authored a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    User(SenderUser),
    /// Posted on behalf of a channel (linked discussion, anonymous channel).
    Channel,
    /// Neither a user nor a sender chat was reported.
    Unknown,
}

/// A group message, reduced to what moderation looks at.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub sender: Sender,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// Kinds of both text and caption entities.
    pub entities: Vec<MessageEntityKind>,
}

/// Tunables for greeting and enforcement.
#[derive(Debug, Clone)]
pub struct ModerationSettings {
    pub welcome_photo_url: Option<Url>,
    pub mute_duration: Duration,
    pub warning_lifetime: Duration,
}

impl From<&Config> for ModerationSettings {
    fn from(config: &Config) -> Self {
        Self {
            welcome_photo_url: config.welcome_photo_url.clone(),
            mute_duration: config.mute_duration,
            warning_lifetime: config.warning_lifetime,
        }
    }
}

#[derive(Clone)]
pub struct Moderator<A: ChatApi> {
    api: A,
    settings: Arc<ModerationSettings>,
    policy: SenderPolicy,
    welcomed: WelcomeTracker,
    timers: TimerRegistry,
}

impl<A: ChatApi> Moderator<A> {
    pub fn new(api: A, settings: ModerationSettings, policy: SenderPolicy) -> Self {
        Self {
            api,
            settings: Arc::new(settings),
            policy,
            welcomed: WelcomeTracker::new(),
            timers: TimerRegistry::new(),
        }
    }

    pub fn from_config(api: A, config: &Config) -> Self {
        Self::new(
            api,
            ModerationSettings::from(config),
            SenderPolicy::new(config.admin_ids.clone()),
        )
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    #[allow(dead_code)]
    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    /// A member transitioned from left to member.
    pub async fn on_member_joined(&self, chat_id: ChatId, user: &SenderUser) {
        self.greet(chat_id, user).await;
    }

    /// Handle a group message: first-message welcome, then link enforcement.
    pub async fn on_message(&self, msg: &InboundMessage) {
        if let Sender::User(user) = &msg.sender {
            self.greet(msg.chat_id, user).await;
        }

        if !links::message_has_link(msg) {
            return;
        }

        if self.policy.is_exempt(&self.api, msg.chat_id, &msg.sender).await {
            debug!("Link from exempt sender in chat {}", msg.chat_id);
            return;
        }

        self.enforce(msg).await;
    }
}
