//! Event de-duplication for Slack retries.
//!
//! Slack redelivers an event when the ack is slow. Every `event_id` seen is
//! remembered; once more than `threshold` ids are held the whole set is
//! cleared rather than pruned.

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::{info, warn};

pub const DEFAULT_DEDUP_THRESHOLD: usize = 1000;

#[derive(Debug)]
pub struct EventDedup {
    threshold: usize,
    seen: Mutex<HashSet<String>>,
}

impl Default for EventDedup {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_THRESHOLD)
    }
}

impl EventDedup {
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            seen: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn seen(&self, event_id: &str) -> bool {
        self.lock().contains(event_id)
    }

    pub fn mark(&self, event_id: &str) {
        let mut seen = self.lock();
        Self::insert_locked(&mut seen, event_id, self.threshold);
    }

    /// Atomically check and record `event_id`.
    ///
    /// Returns `true` the first time an id is observed and `false` for repeats.
    pub fn first_sighting(&self, event_id: &str) -> bool {
        let mut seen = self.lock();
        if seen.contains(event_id) {
            return false;
        }
        Self::insert_locked(&mut seen, event_id, self.threshold);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_locked(seen: &mut HashSet<String>, event_id: &str, threshold: usize) {
        seen.insert(event_id.to_string());
        if seen.len() > threshold {
            info!(size = seen.len(), "Event dedup cache over threshold, clearing");
            seen.clear();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.seen.lock().unwrap_or_else(|poisoned| {
            warn!("Event dedup mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
