//! Chat platform seam.
//!
//! Everything the moderation logic needs from Telegram goes through
//! [`ChatApi`], so handlers can run against the real bot or a recorder.

mod telegram;

#[cfg(test)]
pub mod mock;

use std::future::Future;

use chrono::{DateTime, Utc};
use teloxide::types::{ChatId, ChatPermissions, MessageId, UserId};
use url::Url;

/// Membership role of a user in a chat, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberRole {
    /// Creators and administrators.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Creator | Self::Administrator)
    }
}

/// A rejected or failed platform call.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error(transparent)]
    Request(#[from] teloxide::RequestError),

    #[allow(dead_code)]
    #[error("bad request: {0}")]
    Rejected(String),
}

/// Operations consumed from the chat platform.
pub trait ChatApi: Clone + Send + Sync + 'static {
    /// Query the user's current role in the chat.
    fn member_role(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> impl Future<Output = Result<MemberRole, PlatformError>> + Send;

    fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Replace the member's permissions. `until` of `None` means no expiry.
    fn restrict_member(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        permissions: ChatPermissions,
        until: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Send an HTML-formatted text message.
    fn send_html(
        &self,
        chat_id: ChatId,
        text: String,
    ) -> impl Future<Output = Result<MessageId, PlatformError>> + Send;

    /// Send an image by URL with an HTML caption.
    fn send_photo_url(
        &self,
        chat_id: ChatId,
        photo: Url,
        caption: String,
    ) -> impl Future<Output = Result<MessageId, PlatformError>> + Send;
}

/// Permissions for a muted member: nothing may be sent.
pub fn muted_permissions() -> ChatPermissions {
    ChatPermissions::empty()
}

/// Permissions restored when a mute is lifted.
///
/// Mirrors typical non-admin defaults: no pinning, info changes or topic management.
pub fn standard_member_permissions() -> ChatPermissions {
    ChatPermissions::SEND_MESSAGES
        | ChatPermissions::SEND_AUDIOS
        | ChatPermissions::SEND_DOCUMENTS
        | ChatPermissions::SEND_PHOTOS
        | ChatPermissions::SEND_VIDEOS
        | ChatPermissions::SEND_VIDEO_NOTES
        | ChatPermissions::SEND_VOICE_NOTES
        | ChatPermissions::SEND_POLLS
        | ChatPermissions::SEND_OTHER_MESSAGES
        | ChatPermissions::ADD_WEB_PAGE_PREVIEWS
        | ChatPermissions::INVITE_USERS
}
