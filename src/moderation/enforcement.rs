//! Link enforcement.
//!
//! Delete the message, mute the sender, post a short-lived warning and
//! schedule the mute lift. Only the restriction step is load-bearing: if it
//! fails nothing else happens.

use chrono::{TimeDelta, Utc};
use teloxide::types::{ChatId, UserId};
use tracing::{debug, info, warn};

use super::timers::TimerKey;
use super::{InboundMessage, Moderator, Sender, SenderUser};
use crate::platform::{ChatApi, muted_permissions, standard_member_permissions};
use crate::utils::strip_markup;

/// Build the HTML warning shown after a mute.
pub fn compose_warning(user: &SenderUser, mute_minutes: u64) -> String {
    format!(
        "⚠️ <b>تنبيه:</b> يمنع إرسال الروابط لغير الإدارة.\n\
         تم تقييد <b>{}</b> لمدة <code>{}</code> دقائق.",
        strip_markup(&user.full_name),
        mute_minutes,
    )
}

impl<A: ChatApi> Moderator<A> {
    /// Punish an unauthorized link.
    pub async fn enforce(&self, msg: &InboundMessage) {
        let chat_id = msg.chat_id;

        if let Err(e) = self.api.delete_message(chat_id, msg.message_id).await {
            debug!("Could not delete message {} in chat {}: {}", msg.message_id.0, chat_id, e);
        }

        let user = match &msg.sender {
            Sender::User(user) => user,
            _ => return,
        };

        let mute = self.settings.mute_duration;
        let until = Utc::now() + TimeDelta::seconds(mute.as_secs() as i64);

        if let Err(e) = self
            .api
            .restrict_member(chat_id, user.id, muted_permissions(), Some(until))
            .await
        {
            warn!("Failed to mute {} in chat {}: {}", user.id, chat_id, e);
            return;
        }

        info!(
            "Muted {} in chat {} for {}s (unauthorized link)",
            user.id,
            chat_id,
            mute.as_secs()
        );

        let warning = compose_warning(user, mute.as_secs() / 60);
        match self.api.send_html(chat_id, warning).await {
            Ok(warning_id) => {
                let api = self.api.clone();
                self.timers.schedule(
                    TimerKey::warning(chat_id, user.id, warning_id),
                    self.settings.warning_lifetime,
                    async move {
                        if let Err(e) = api.delete_message(chat_id, warning_id).await {
                            debug!("Could not delete warning {} in chat {}: {}", warning_id.0, chat_id, e);
                        }
                    },
                );
            }
            Err(e) => debug!("Failed to post link warning in chat {}: {}", chat_id, e),
        }

        self.schedule_lift(chat_id, user.id);
    }

    /// Restore standard permissions once the mute duration has elapsed.
    fn schedule_lift(&self, chat_id: ChatId, user_id: UserId) {
        let api = self.api.clone();

        self.timers.schedule(
            TimerKey::lift(chat_id, user_id),
            self.settings.mute_duration,
            async move {
                match api
                    .restrict_member(chat_id, user_id, standard_member_permissions(), None)
                    .await
                {
                    Ok(()) => info!("Lifted mute for {} in chat {}", user_id, chat_id),
                    Err(e) => debug!("Failed to lift mute for {} in chat {}: {}", user_id, chat_id, e),
                }
            },
        );
    }
}
