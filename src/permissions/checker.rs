//! Exemption checker.

use std::collections::HashSet;
use std::sync::Arc;

use teloxide::types::{ChatId, UserId};
use tracing::{debug, warn};

use crate::moderation::Sender;
use crate::platform::ChatApi;

/// Decides whether a sender may post links.
///
/// Configured admins bypass the live role query entirely.
#[derive(Clone, Debug)]
pub struct SenderPolicy {
    admin_ids: Arc<HashSet<u64>>,
}

impl SenderPolicy {
    pub fn new(admin_ids: HashSet<u64>) -> Self {
        Self {
            admin_ids: Arc::new(admin_ids),
        }
    }

    /// Check if a user is in the configured admin set.
    #[inline]
    pub fn is_configured_admin(&self, user_id: UserId) -> bool {
        self.admin_ids.contains(&user_id.0)
    }

    /// Whether the sender is exempt from link enforcement in this chat.
    ///
    /// A failed role query counts as not exempt.
    pub async fn is_exempt<A: ChatApi>(&self, api: &A, chat_id: ChatId, sender: &Sender) -> bool {
        let user = match sender {
            Sender::Channel => return true,
            Sender::Unknown => return false,
            Sender::User(user) => user,
        };

        if self.is_configured_admin(user.id) {
            debug!("User {} is a configured admin", user.id);
            return true;
        }

        match api.member_role(chat_id, user.id).await {
            Ok(role) => role.is_privileged(),
            Err(e) => {
                warn!(
                    "Role query for user {} in chat {} failed, treating as non-admin: {}",
                    user.id, chat_id, e
                );
                false
            }
        }
    }
}
