//! Delayed-action registry.
//!
//! Every deferred action (warning cleanup, mute lift) runs as its own tokio
//! task and is tracked here by key, so a pending action can be looked up or
//! cancelled. Finished tasks remove their own entry.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use teloxide::types::{ChatId, MessageId, UserId};
use tokio::task::AbortHandle;
use tracing::debug;

/// What a pending timer is going to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Restore the member's permissions after a mute.
    RestrictionLift,
    /// Remove a transient warning message.
    WarningDeletion(MessageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub kind: TimerKind,
}

impl TimerKey {
    pub fn lift(chat_id: ChatId, user_id: UserId) -> Self {
        Self {
            chat_id,
            user_id,
            kind: TimerKind::RestrictionLift,
        }
    }

    pub fn warning(chat_id: ChatId, user_id: UserId, message_id: MessageId) -> Self {
        Self {
            chat_id,
            user_id,
            kind: TimerKind::WarningDeletion(message_id),
        }
    }
}

struct PendingTimer {
    id: u64,
    handle: AbortHandle,
}

#[derive(Clone, Default)]
pub struct TimerRegistry {
    pending: Arc<DashMap<TimerKey, PendingTimer>>,
    next_id: Arc<AtomicU64>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay`.
    ///
    /// A timer already pending under the same key is aborted and replaced.
    pub fn schedule<F>(&self, key: TimerKey, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);

        // Hold the slot while spawning so the task can't finish and clean up
        // before its own entry exists.
        let slot = self.pending.entry(key);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
            pending.remove_if(&key, |_, timer| timer.id == id);
        });

        let timer = PendingTimer {
            id,
            handle: handle.abort_handle(),
        };

        match slot {
            Entry::Occupied(mut occupied) => {
                let previous = occupied.insert(timer);
                previous.handle.abort();
                debug!("Replaced pending timer {:?}", key);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(timer);
            }
        }
    }

    /// Cancel a pending timer. Returns `false` if nothing was pending.
    #[allow(dead_code)]
    pub fn cancel(&self, key: &TimerKey) -> bool {
        match self.pending.remove(key) {
            Some((_, timer)) => {
                timer.handle.abort();
                debug!("Cancelled timer {:?}", key);
                true
            }
            None => false,
        }
    }

    #[allow(dead_code)]
    pub fn is_pending(&self, key: &TimerKey) -> bool {
        self.pending.contains_key(key)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
