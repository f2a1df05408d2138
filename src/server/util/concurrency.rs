//! Per-key command concurrency limits.
//!
//! A command acquires a permit for its key before doing any work. The permit
//! releases the key when dropped, so an early return or a failed Discord call
//! cannot leave a key stuck.
//!
//! The bot and the dashboard API share one guard, so closing or locking a
//! ticket from either side is serialized per channel.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

pub const TICKET_NEW: &str = TICKET_NEW;
pub const TICKET_CLOSE: &str = TICKET_CLOSE;
pub const TICKET_LOCK: &str = TICKET_LOCK;

pub const CONCURRENCY_REACHED: &str = "Maximum concurrency for this command has been reached.";

/// Identifies one concurrency bucket, e.g. `/ticket new` for a member in a guild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConcurrencyKey {
    command: &'static str,
    scope: u64,
    target: u64,
}

impl ConcurrencyKey {
    /// One invocation at a time per member of a guild.
    pub fn member(command: &'static str, guild_id: u64, user_id: u64) -> Self {
        Self {
            command,
            scope: guild_id,
            target: user_id,
        }
    }

    /// One invocation at a time per channel.
    pub fn channel(command: &'static str, channel_id: u64) -> Self {
        Self {
            command,
            scope: 0,
            target: channel_id,
        }
    }
}

/// Registry of keys that currently have a command running.
#[derive(Clone, Default)]
pub struct ConcurrencyGuard {
    active: Arc<Mutex<HashSet<ConcurrencyKey>>>,
}

impl ConcurrencyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` while another invocation holds it.
    pub fn try_acquire(&self, key: ConcurrencyKey) -> Option<ConcurrencyPermit> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if !active.insert(key) {
            return None;
        }

        Some(ConcurrencyPermit {
            active: Arc::clone(&self.active),
            key,
        })
    }
}

/// Held for the duration of a command; releases its key on drop.
pub struct ConcurrencyPermit {
    active: Arc<Mutex<HashSet<ConcurrencyKey>>>,
    key: ConcurrencyKey,
}

impl Drop for ConcurrencyPermit {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: second acquire for the same key is refused
    #[test]
    fn rejects_concurrent_invocation() {
        let guard = ConcurrencyGuard::new();
        let key = ConcurrencyKey::member(TICKET_NEW, 1, 2);

        let permit = guard.try_acquire(key);
        assert!(permit.is_some());
        assert!(guard.try_acquire(key).is_none());
    }

    /// Expected: dropping the permit frees the key
    #[test]
    fn releases_key_on_drop() {
        let guard = ConcurrencyGuard::new();
        let key = ConcurrencyKey::channel(TICKET_CLOSE, 5);

        {
            let _permit = guard.try_acquire(key);
        }

        assert!(guard.try_acquire(key).is_some());
    }

    /// Expected: different members and commands do not block each other
    #[test]
    fn keys_are_independent() {
        let guard = ConcurrencyGuard::new();

        let _a = guard.try_acquire(ConcurrencyKey::member(TICKET_NEW, 1, 2));
        assert!(guard
            .try_acquire(ConcurrencyKey::member(TICKET_NEW, 1, 3))
            .is_some());
        assert!(guard
            .try_acquire(ConcurrencyKey::channel(TICKET_LOCK, 2))
            .is_some());
        assert!(guard
            .try_acquire(ConcurrencyKey::channel(TICKET_CLOSE, 2))
            .is_some());
    }

    /// Expected: a clone handed to another component sees the same keys
    #[test]
    fn clones_share_active_keys() {
        let bot = ConcurrencyGuard::new();
        let dashboard = bot.clone();
        let key = ConcurrencyKey::channel(TICKET_CLOSE, 200);

        let permit = bot.try_acquire(key);
        assert!(permit.is_some());
        assert!(dashboard.try_acquire(key).is_none());

        drop(permit);
        assert!(dashboard.try_acquire(key).is_some());
    }
}
