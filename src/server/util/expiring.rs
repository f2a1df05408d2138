//! In-memory map whose entries expire after a fixed time-to-live.
//!
//! Holds short-lived interaction state between component clicks: setup wizard
//! drafts and the topic of a ticket waiting on its question modal. Expired
//! entries are invisible to readers and pruned on every write.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Shared map with per-entry expiry.
///
/// Clones share the same storage.
#[derive(Clone)]
pub struct ExpiringMap<K, V> {
    entries: Arc<RwLock<HashMap<K, Entry<V>>>>,
    ttl: Duration,
}

impl<K, V> ExpiringMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Inserts or replaces `value`, restarting its time-to-live.
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired());
        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Returns a copy of the live value for `key`.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Applies `f` to the live value for `key` and restarts its time-to-live.
    ///
    /// # Returns
    /// - `Some(V)` - Copy of the updated value
    /// - `None` - No live entry for `key`
    pub async fn update<F>(&self, key: &K, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(key).filter(|entry| !entry.is_expired())?;

        f(&mut entry.value);
        entry.expires_at = Instant::now() + self.ttl;

        Some(entry.value.clone())
    }

    /// Removes and returns the live value for `key`.
    pub async fn take(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write().await;
        entries.remove(key).filter(|entry| !entry.is_expired()).map(|entry| entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Expected: inserted value is readable until taken
    #[tokio::test]
    async fn take_removes_value() {
        let map = ExpiringMap::new(Duration::from_secs(60));
        map.insert((1u64, 2u64), "draft".to_string()).await;

        assert_eq!(map.get(&(1, 2)).await.as_deref(), Some("draft"));
        assert_eq!(map.take(&(1, 2)).await.as_deref(), Some("draft"));
        assert!(map.get(&(1, 2)).await.is_none());
    }

    /// Expected: update changes the stored value in place
    #[tokio::test]
    async fn update_mutates_live_entry() {
        let map = ExpiringMap::new(Duration::from_secs(60));
        map.insert(1u64, vec![1u64]).await;

        let updated = map.update(&1, |roles| roles.push(2)).await;
        assert_eq!(updated, Some(vec![1, 2]));
        assert!(map.update(&9, |roles| roles.push(3)).await.is_none());
    }

    /// Expected: entries vanish after the time-to-live
    #[tokio::test]
    async fn entries_expire() {
        let map = ExpiringMap::new(Duration::from_millis(20));
        map.insert(1u64, 1u8).await;

        sleep(Duration::from_millis(40)).await;

        assert!(map.get(&1).await.is_none());
        assert!(map.update(&1, |v| *v += 1).await.is_none());
        assert!(map.take(&1).await.is_none());
    }
}
