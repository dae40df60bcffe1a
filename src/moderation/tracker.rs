//! Welcome tracker.
//!
//! Remembers which (chat, user) pairs were already greeted during this
//! process lifetime. Entries are never removed.

use std::sync::Arc;

use dashmap::DashSet;
use teloxide::types::{ChatId, UserId};

/// Identity of a greeted member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WelcomeKey {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl WelcomeKey {
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self { chat_id, user_id }
    }
}

#[derive(Clone, Default)]
pub struct WelcomeTracker {
    seen: Arc<DashSet<WelcomeKey>>,
}

impl WelcomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pair as welcomed.
    ///
    /// Returns `true` only for the first call with a given key, so callers
    /// can claim the greeting before doing any I/O.
    pub fn claim(&self, key: WelcomeKey) -> bool {
        self.seen.insert(key)
    }

    #[allow(dead_code)]
    pub fn contains(&self, key: &WelcomeKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_once_per_pair() {
        let tracker = WelcomeTracker::new();
        let key = WelcomeKey::new(ChatId(-100), UserId(7));

        assert!(tracker.claim(key));
        assert!(!tracker.claim(key));
        assert!(tracker.contains(&key));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_pairs_are_independent() {
        let tracker = WelcomeTracker::new();

        assert!(tracker.claim(WelcomeKey::new(ChatId(-1), UserId(7))));
        assert!(tracker.claim(WelcomeKey::new(ChatId(-2), UserId(7))));
        assert!(tracker.claim(WelcomeKey::new(ChatId(-1), UserId(8))));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let tracker = WelcomeTracker::new();
        let other = tracker.clone();
        let key = WelcomeKey::new(ChatId(-1), UserId(1));

        assert!(tracker.claim(key));
        assert!(!other.claim(key));
    }
}
