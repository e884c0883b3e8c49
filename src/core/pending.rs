//! Pending-selection store.
//!
//! Holds extracted content per Slack thread while the user picks a voice.
//! At most one entry per `(channel, thread)`; a newer extraction replaces the
//! older one. When the store is full, the oldest half (by insertion order) is
//! dropped in one go.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, warn};

use super::models::{ExtractedContent, PendingKey};

pub const DEFAULT_PENDING_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct PendingEntry {
    pub content: ExtractedContent,
    pub created_at: DateTime<Utc>,
    seq: u64,
}

impl PendingEntry {
    /// How long the entry has been waiting for a voice choice as of `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.created_at)
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<PendingKey, PendingEntry>,
    next_seq: u64,
}

#[derive(Debug)]
pub struct PendingStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for PendingStore {
    fn default() -> Self {
        Self::new(DEFAULT_PENDING_CAPACITY)
    }
}

impl PendingStore {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Store `content` for `key`, replacing any existing entry.
    pub fn put(&self, key: PendingKey, content: ExtractedContent) {
        let mut inner = self.lock();

        // An overwrite counts as a fresh insertion for eviction order.
        inner.entries.remove(&key);

        if inner.entries.len() >= self.capacity {
            let evicted = evict_oldest_half(&mut inner.entries);
            info!(
                evicted,
                remaining = inner.entries.len(),
                "Pending store full, evicted oldest entries"
            );
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key,
            PendingEntry {
                content,
                created_at: Utc::now(),
                seq,
            },
        );
    }

    /// Remove and return the entry for `key`, if any.
    pub fn take(&self, key: &PendingKey) -> Option<PendingEntry> {
        let entry = self.lock().entries.remove(key)?;
        info!(
            key = %key,
            waited_secs = entry.age(Utc::now()).num_seconds(),
            "Claimed pending content"
        );
        Some(entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, key: &PendingKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Pending store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn evict_oldest_half(entries: &mut HashMap<PendingKey, PendingEntry>) -> usize {
    let mut by_age: Vec<(u64, PendingKey)> = entries
        .iter()
        .map(|(k, e)| (e.seq, k.clone()))
        .collect();
    by_age.sort_unstable_by_key(|(seq, _)| *seq);

    let to_evict = by_age.len() / 2;
    for (_, key) in by_age.into_iter().take(to_evict) {
        entries.remove(&key);
    }
    to_evict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SourceKind;

    fn content(text: &str) -> ExtractedContent {
        ExtractedContent::new(text.to_string(), "https://example.com", SourceKind::Url)
    }

    #[test]
    fn second_put_overwrites_first() {
        let store = PendingStore::default();
        let key = PendingKey::new("C1", "1.0");
        store.put(key.clone(), content("first"));
        store.put(key.clone(), content("second"));

        assert_eq!(store.len(), 1);
        let entry = store.take(&key).unwrap();
        assert_eq!(entry.content.text(), "second");
        assert!(store.take(&key).is_none());
    }

    #[test]
    fn take_distinguishes_missing_from_empty_content() {
        let store = PendingStore::default();
        let key = PendingKey::new("C1", "1.0");
        assert!(store.take(&key).is_none());

        store.put(key.clone(), content(""));
        let entry = store.take(&key);
        assert!(entry.is_some());
        assert_eq!(entry.unwrap().content.text(), "");
    }

    #[test]
    fn claimed_entry_reports_its_wait() {
        let store = PendingStore::default();
        let key = PendingKey::new("C1", "1.0");
        let before = Utc::now();
        store.put(key.clone(), content("body"));

        let entry = store.take(&key).unwrap();
        assert!(entry.created_at >= before);
        let later = entry.created_at + TimeDelta::seconds(90);
        assert_eq!(entry.age(later).num_seconds(), 90);
    }

    #[test]
    fn overflow_evicts_oldest_half_and_keeps_newest() {
        let store = PendingStore::new(10);
        for i in 0..10 {
            store.put(PendingKey::new("C1", i.to_string()), content("x"));
        }
        assert_eq!(store.len(), 10);

        store.put(PendingKey::new("C1", "10"), content("x"));
        assert_eq!(store.len(), 6);
        for i in 0..5 {
            assert!(!store.contains(&PendingKey::new("C1", i.to_string())));
        }
        for i in 5..=10 {
            assert!(store.contains(&PendingKey::new("C1", i.to_string())));
        }
    }

    #[test]
    fn overwrite_refreshes_insertion_order() {
        let store = PendingStore::new(4);
        for i in 0..4 {
            store.put(PendingKey::new("C1", i.to_string()), content("x"));
        }
        // Re-put the oldest key; it becomes the newest.
        store.put(PendingKey::new("C1", "0"), content("y"));
        store.put(PendingKey::new("C1", "4"), content("x"));

        assert!(store.contains(&PendingKey::new("C1", "0")));
        assert!(!store.contains(&PendingKey::new("C1", "1")));
        assert!(!store.contains(&PendingKey::new("C1", "2")));
    }
}
