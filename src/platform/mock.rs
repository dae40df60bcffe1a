//! Recording [`ChatApi`] for handler tests.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use teloxide::types::{ChatId, ChatPermissions, MessageId, UserId};
use url::Url;

use super::{ChatApi, MemberRole, PlatformError};

/// A platform call as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MemberRole(ChatId, UserId),
    Delete(ChatId, MessageId),
    Restrict {
        chat_id: ChatId,
        user_id: UserId,
        permissions: ChatPermissions,
        until: Option<DateTime<Utc>>,
    },
    SendHtml(ChatId, String),
    SendPhoto(ChatId, Url, String),
}

#[derive(Clone)]
pub struct MockApi {
    calls: Arc<Mutex<Vec<Call>>>,
    next_message_id: Arc<AtomicI32>,
    role: Option<MemberRole>,
    fail_restrict: bool,
    fail_delete: bool,
    fail_send: bool,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            next_message_id: Arc::new(AtomicI32::new(1000)),
            role: Some(MemberRole::Member),
            fail_restrict: false,
            fail_delete: false,
            fail_send: false,
        }
    }
}

impl MockApi {
    /// Role reported by `member_role`. `None` makes the query fail.
    pub fn with_role(mut self, role: Option<MemberRole>) -> Self {
        self.role = role;
        self
    }

    pub fn failing_restrict(mut self) -> Self {
        self.fail_restrict = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendHtml(_, text) | Call::SendPhoto(_, _, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn restricts(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Restrict { .. }))
            .collect()
    }

    pub fn deletes(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(_, id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn rejected() -> PlatformError {
        PlatformError::Rejected("Bad Request: not enough rights".to_string())
    }
}

impl ChatApi for MockApi {
    async fn member_role(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberRole, PlatformError> {
        self.record(Call::MemberRole(chat_id, user_id));
        self.role.ok_or_else(|| PlatformError::Rejected("Bad Request: user not found".to_string()))
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), PlatformError> {
        self.record(Call::Delete(chat_id, message_id));
        if self.fail_delete {
            return Err(Self::rejected());
        }
        Ok(())
    }

    async fn restrict_member(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        permissions: ChatPermissions,
        until: Option<DateTime<Utc>>,
    ) -> Result<(), PlatformError> {
        self.record(Call::Restrict {
            chat_id,
            user_id,
            permissions,
            until,
        });
        if self.fail_restrict {
            return Err(Self::rejected());
        }
        Ok(())
    }

    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<MessageId, PlatformError> {
        self.record(Call::SendHtml(chat_id, text));
        if self.fail_send {
            return Err(Self::rejected());
        }
        Ok(MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn send_photo_url(
        &self,
        chat_id: ChatId,
        photo: Url,
        caption: String,
    ) -> Result<MessageId, PlatformError> {
        self.record(Call::SendPhoto(chat_id, photo, caption));
        if self.fail_send {
            return Err(Self::rejected());
        }
        Ok(MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }
}
