//! Link detection.
//!
//! Best-effort lexical check: structured link entities, or URL-looking text.
//! Obfuscated links (spaced-out domains and the like) are not caught.

use once_cell::sync::Lazy;
use regex::Regex;
use teloxide::types::MessageEntityKind;

use super::InboundMessage;

static LINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:https?://|www\.)\S+|t\.me/\S+|telegram\.me/\S+)")
        .expect("link pattern is valid")
});

/// Whether the message carries a hyperlink or invite reference.
pub fn message_has_link(msg: &InboundMessage) -> bool {
    if msg.entities.iter().any(is_link_entity) {
        return true;
    }

    [msg.text.as_deref(), msg.caption.as_deref()]
        .into_iter()
        .flatten()
        .any(text_has_link)
}

/// Raw URLs and masked (text) links.
fn is_link_entity(kind: &MessageEntityKind) -> bool {
    matches!(kind, MessageEntityKind::Url | MessageEntityKind::TextLink { .. })
}

pub fn text_has_link(text: &str) -> bool {
    LINK_REGEX.is_match(text)
}
