//! Welcome messages.
//!
//! Each (chat, user) pair is greeted at most once per process lifetime,
//! whether the trigger was a join event or the user's first message.

use chrono::{DateTime, Utc};
use teloxide::types::ChatId;
use tracing::{debug, info, warn};

use super::tracker::WelcomeKey;
use super::{Moderator, SenderUser};
use crate::platform::ChatApi;
use crate::utils::{format_handle, format_utc, strip_markup};

/// Shown instead of the handle for users without a username.
const NO_USERNAME: &str = "لا يوجد";

/// Build the HTML welcome text.
pub fn compose_welcome(user: &SenderUser, at: DateTime<Utc>) -> String {
    let handle = format_handle(user.username.as_deref(), NO_USERNAME);

    format!(
        "👋 <b>مرحباً بك في المجموعة</b>\n\n\
         👤 <b>الاسم:</b> {}\n\
         🆔 <b>الآيدي:</b> <code>{}</code>\n\
         🔗 <b>المعرف:</b> <code>{}</code>\n\
         📌 <b>التاريخ/الوقت:</b> <code>{}</code>\n\n\
         📖 <b>قوانين المجموعة:</b>\n\
         • يمنع إرسال الروابط من غير الإدارة.\n\
         • يمنع السبام والإزعاج.\n\
         • احترام الجميع.\n\n\
         ✨ نتمنى لك إقامة طيبة معنا.",
        strip_markup(&user.full_name),
        user.id,
        handle,
        format_utc(at),
    )
}

impl<A: ChatApi> Moderator<A> {
    /// Greet the user unless they were already greeted in this chat.
    ///
    /// Returns `true` if a welcome was attempted. Delivery failures are logged
    /// and otherwise ignored.
    pub async fn greet(&self, chat_id: ChatId, user: &SenderUser) -> bool {
        // Claim before any await so concurrent triggers can't double-send
        if !self.welcomed.claim(WelcomeKey::new(chat_id, user.id)) {
            return false;
        }

        debug!(
            "Greeting user {} in chat {} ({} welcomed so far)",
            user.id,
            chat_id,
            self.welcomed.len()
        );

        let text = compose_welcome(user, Utc::now());

        let result = match &self.settings.welcome_photo_url {
            Some(photo) => self.api.send_photo_url(chat_id, photo.clone(), text).await,
            None => self.api.send_html(chat_id, text).await,
        };

        match result {
            Ok(_) => info!("Sent welcome message to {} in chat {}", user.id, chat_id),
            Err(e) => warn!("Failed to welcome {} in chat {}: {}", user.id, chat_id, e),
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use regex::Regex;

    use super::*;
    use crate::moderation::fixtures::*;
    use crate::permissions::SenderPolicy;
    use crate::platform::mock::{Call, MockApi};

    #[test]
    fn test_welcome_contains_identity_and_time() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 1).unwrap();
        let text = compose_welcome(&user(987654, "Sara", Some("sara_k")), at);

        assert!(text.contains("<code>987654</code>"));
        assert!(text.contains("@sara_k"));
        assert!(text.contains("31/01/2025 23:59:01 UTC"));
        assert!(text.contains("Sara"));
    }

    #[test]
    fn test_welcome_without_username_uses_placeholder() {
        let text = compose_welcome(&user(1, "Sara", None), Utc::now());
        assert!(text.contains(&format!("<code>{}</code>", NO_USERNAME)));
    }

    #[test]
    fn test_welcome_strips_markup_from_name() {
        let text = compose_welcome(&user(1, "<script>x</script>", None), Utc::now());

        assert!(!text.contains("<script>"));
        assert!(!text.contains("</script>"));
        assert!(text.contains("scriptx/script"));
    }

    #[tokio::test]
    async fn test_greet_twice_sends_once() {
        let api = MockApi::default();
        let moderator = moderator(&api, &[]);
        let sara = user(42, "Sara", None);

        assert!(moderator.greet(CHAT, &sara).await);
        assert!(!moderator.greet(CHAT, &sara).await);

        assert_eq!(api.sent_texts().len(), 1);
    }

    #[tokio::test]
    async fn test_greet_sends_current_utc_time() {
        let api = MockApi::default();
        let moderator = moderator(&api, &[]);

        moderator.greet(CHAT, &user(42, "Sara", None)).await;

        let texts = api.sent_texts();
        let pattern = Regex::new(r"\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2} UTC").unwrap();
        assert!(texts[0].contains("<code>42</code>"));
        assert!(pattern.is_match(&texts[0]));
    }

    #[tokio::test]
    async fn test_greet_per_chat() {
        let api = MockApi::default();
        let moderator = moderator(&api, &[]);
        let sara = user(42, "Sara", None);

        moderator.greet(ChatId(-1), &sara).await;
        moderator.greet(ChatId(-2), &sara).await;

        assert_eq!(api.sent_texts().len(), 2);
    }

    #[tokio::test]
    async fn test_greet_with_photo_uses_caption() {
        let api = MockApi::default();
        let mut settings = settings();
        settings.welcome_photo_url = Some("https://example.com/welcome.jpg".parse().unwrap());
        let moderator = Moderator::new(api.clone(), settings, SenderPolicy::new(Default::default()));

        moderator.greet(CHAT, &user(42, "Sara", None)).await;

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::SendPhoto(chat, url, caption) => {
                assert_eq!(*chat, CHAT);
                assert_eq!(url.as_str(), "https://example.com/welcome.jpg");
                assert!(caption.contains("<code>42</code>"));
            }
            other => panic!("expected photo, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_send_is_not_retried() {
        let api = MockApi::default().failing_send();
        let moderator = moderator(&api, &[]);
        let sara = user(42, "Sara", None);

        assert!(moderator.greet(CHAT, &sara).await);
        assert!(!moderator.greet(CHAT, &sara).await);
        assert_eq!(api.calls().len(), 1);
    }
}
