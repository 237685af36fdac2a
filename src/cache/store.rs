//! Cache Store Module
//!
//! The unsynchronized inner map. `Cache` wraps it in a mutex shared with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key → entry storage with a single fixed expiry interval.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Expiry threshold used by sweeps
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store that expires entries older than `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            interval,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and resetting its age.
    pub fn set(&mut self, key: String, value: Vec<u8>) {
        self.set_at(key, value, Instant::now());
    }

    /// Same as [`set`](Self::set) with an explicit insertion instant.
    pub fn set_at(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries.insert(key, CacheEntry::stamped_at(value, now));
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Expiry is only enforced by sweeps, so an entry past its interval stays
    /// readable until the next one.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Evict Expired ==
    /// Removes every entry whose age at `now` strictly exceeds the interval.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let interval = self.interval;
        self.entries.retain(|_, entry| !entry.is_expired(now, interval));
        before - self.entries.len()
    }

    // == Interval ==
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
