//! [`ChatApi`] over the throttled teloxide bot.

use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, ChatPermissions, InputFile, MessageId, ParseMode};
use url::Url;

use super::{ChatApi, MemberRole, PlatformError};
use crate::bot::dispatcher::ThrottledBot;

impl ChatApi for ThrottledBot {
    async fn member_role(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberRole, PlatformError> {
        let member = self.get_chat_member(chat_id, user_id).await?;

        Ok(match member.kind {
            ChatMemberKind::Owner { .. } => MemberRole::Creator,
            ChatMemberKind::Administrator { .. } => MemberRole::Administrator,
            ChatMemberKind::Member { .. } => MemberRole::Member,
            ChatMemberKind::Restricted { .. } => MemberRole::Restricted,
            ChatMemberKind::Left { .. } => MemberRole::Left,
            ChatMemberKind::Banned { .. } => MemberRole::Banned,
        })
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), PlatformError> {
        Requester::delete_message(self, chat_id, message_id).await?;
        Ok(())
    }

    async fn restrict_member(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        permissions: ChatPermissions,
        until: Option<DateTime<Utc>>,
    ) -> Result<(), PlatformError> {
        let req = self.restrict_chat_member(chat_id, user_id, permissions);
        let req = if let Some(dt) = until {
            req.until_date(dt)
        } else {
            req
        };

        req.await?;
        Ok(())
    }

    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<MessageId, PlatformError> {
        let sent = self
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(sent.id)
    }

    async fn send_photo_url(
        &self,
        chat_id: ChatId,
        photo: Url,
        caption: String,
    ) -> Result<MessageId, PlatformError> {
        let sent = self
            .send_photo(chat_id, InputFile::url(photo))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(sent.id)
    }
}
