//! Cache Entry Module
//!
//! Defines a single cached payload and the instant it was stored.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A raw response body plus its insertion instant.
///
/// Entries are never mutated; an overwrite replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// When the entry was (last) added
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::stamped_at(value, Instant::now())
    }

    /// Creates an entry stamped with an explicit instant.
    pub fn stamped_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between insertion and `now` (zero if `now` is earlier).
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `interval` at `now`.
    ///
    /// The comparison is strict: an entry whose age equals the interval
    /// exactly is still live.
    pub fn is_expired(&self, now: Instant, interval: Duration) -> bool {
        self.age(now) > interval
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(b"testdata".to_vec());
        assert_eq!(entry.value, b"testdata");
        assert!(!entry.is_expired(Instant::now(), Duration::from_secs(5)));
    }

    #[test]
    fn test_entry_age() {
        let now = Instant::now();
        let entry = CacheEntry::stamped_at(Vec::new(), now);

        assert_eq!(entry.age(now), Duration::ZERO);
        assert_eq!(
            entry.age(now + Duration::from_millis(40)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_entry_age_before_creation_is_zero() {
        let now = Instant::now();
        let entry = CacheEntry::stamped_at(Vec::new(), now + Duration::from_secs(1));
        assert_eq!(entry.age(now), Duration::ZERO);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let interval = Duration::from_millis(100);
        let now = Instant::now();
        let entry = CacheEntry::stamped_at(b"v".to_vec(), now);

        assert!(!entry.is_expired(now + interval, interval), "age == interval is live");
        assert!(entry.is_expired(now + interval + Duration::from_nanos(1), interval));
    }
}
