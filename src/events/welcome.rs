//! Welcome event handler.
//!
//! Greets members whose status changes from left to member.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, ChatMemberUpdated};
use tracing::debug;

use super::{is_group_chat, sender_user};
use crate::bot::dispatcher::AppState;

/// Returns the handler for new member events.
pub fn handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(is_new_member).endpoint(welcome_handler)
}

/// Check if this is a plain join in a group.
///
/// Promotions, bans and restrictions are ignored.
fn is_new_member(update: ChatMemberUpdated) -> bool {
    is_group_chat(&update.chat)
        && is_join_transition(&update.old_chat_member.kind, &update.new_chat_member.kind)
}

pub(crate) fn is_join_transition(old: &ChatMemberKind, new: &ChatMemberKind) -> bool {
    matches!(old, ChatMemberKind::Left { .. }) && matches!(new, ChatMemberKind::Member { .. })
}

/// Handle new member join event.
async fn welcome_handler(update: ChatMemberUpdated, state: AppState) -> anyhow::Result<()> {
    let user = sender_user(&update.new_chat_member.user);

    debug!("New member {} joined chat {}", user.id, update.chat.id);

    state.moderator.on_member_joined(update.chat.id, &user).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn member_update(old_status: &str, new_status: &str) -> ChatMemberUpdated {
        let user = json!({ "id": 42, "is_bot": false, "first_name": "Sara" });
        serde_json::from_value(json!({
            "chat": { "id": -1001, "type": "supergroup", "title": "Group" },
            "from": user,
            "date": 1700000000,
            "old_chat_member": { "user": user, "status": old_status },
            "new_chat_member": { "user": user, "status": new_status }
        }))
        .unwrap()
    }

    #[test]
    fn test_left_to_member_is_join() {
        assert!(is_new_member(member_update("left", "member")));
    }

    #[test]
    fn test_other_transitions_are_ignored() {
        assert!(!is_new_member(member_update("member", "left")));
        assert!(!is_new_member(member_update("left", "left")));
        assert!(!is_new_member(member_update("member", "member")));
    }
}
