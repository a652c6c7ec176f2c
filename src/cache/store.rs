//! Cache Store Module
//!
//! Key-value map with per-entry expiration. Stale entries are invisible to
//! readers and are purged on the read that finds them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::stats::Removal;
use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, Ttl};

// == Cache Store ==
/// In-memory TTL store.
///
/// There is no capacity bound: the store only ever holds what callers put
/// in it, and stale entries leave on read, on `cleanup_expired`, or when
/// the process exits.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied to writes made with `Ttl::Default`
    default_ttl: Duration,
    /// Time source for expiration
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store that reads wall-clock time.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store driven by the given clock.
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the value stored under `key` if it is still live.
    ///
    /// A stale entry is removed as a side effect and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let live = match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.stats.record_removed(Removal::Expired, 1);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        };

        self.stats.record_lookup(live.is_some());
        live
    }

    /// Drops an entry that `get` just returned but the caller could not
    /// use, and counts that read as a miss instead of a hit.
    pub fn reject_hit(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.stats.reclassify_hit_as_miss();
            self.stats.record_removed(Removal::Invalidated, 1);
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and its
    /// expiration.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Ttl) {
        let now = self.clock.now_ms();
        let expires_at = ttl.expires_at(now, self.default_ttl);

        self.entries
            .insert(key.into(), CacheEntry::new(value, now, expires_at));
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Returns whether one was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.record_removed(Removal::Invalidated, usize::from(removed));
        removed
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        self.remove_where(Removal::Invalidated, |key, _| key.starts_with(prefix))
    }

    // == Clear ==
    /// Removes all entries. Counters are kept.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.record_removed(Removal::Invalidated, removed);
    }

    // == Cleanup Expired ==
    /// Purges every stale entry, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.remove_where(Removal::Expired, |_, entry| entry.is_expired(now))
    }

    fn remove_where<P>(&mut self, cause: Removal, mut doomed: P) -> usize
    where
        P: FnMut(&str, &CacheEntry<V>) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, entry| !doomed(key.as_str(), entry));

        let removed = before - self.entries.len();
        self.stats.record_removed(cause, removed);
        removed
    }

    /// Remaining lifetime of a live entry.
    ///
    /// # Returns
    /// - `None` if the key is absent or stale
    /// - `Some(None)` if the entry never expires
    /// - `Some(Some(remaining))` otherwise
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl_remaining(now))
    }

    // == Stats ==
    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Number of stored entries, stale ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

    fn store_with_clock() -> (CacheStore<String>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let store = CacheStore::with_clock(DEFAULT_TTL, Arc::new(clock.clone()));
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(DEFAULT_TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.default_ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_get_never_set_is_absent() {
        let (mut store, _) = store_with_clock();
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_set_and_get() {
        let (mut store, _) = store_with_clock();

        store.set("key1", "value1".to_string(), Ttl::Default);

        assert_eq!(store.get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_stock_page_expires_after_ttl() {
        let (mut store, clock) = store_with_clock();

        store.set("stock-1-1-10", "pageResult".to_string(), Ttl::Millis(60_000));

        clock.advance_ms(30_000);
        assert_eq!(store.get("stock-1-1-10").as_deref(), Some("pageResult"));

        clock.advance_ms(31_000);
        assert_eq!(store.get("stock-1-1-10"), None);
        assert!(store.is_empty(), "stale entry should be purged on read");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_default_ttl_applies_when_unset() {
        let (mut store, clock) = store_with_clock();

        store.set("forecast-9", "data".to_string(), Ttl::Default);

        clock.advance_ms(59_999);
        assert!(store.get("forecast-9").is_some());

        clock.advance_ms(1);
        assert!(store.get("forecast-9").is_none());
    }

    #[test]
    fn test_invalidate_before_default_ttl() {
        let (mut store, _) = store_with_clock();

        store.set("forecast-9", "data".to_string(), Ttl::Default);
        assert!(store.invalidate("forecast-9"));

        assert_eq!(store.get("forecast-9"), None);
        assert_eq!(store.stats().invalidations, 1);
    }

    #[test]
    fn test_rejected_hit_counts_as_miss() {
        let (mut store, _) = store_with_clock();

        store.set("stock-1-1-10", "legacy".to_string(), Ttl::Default);
        assert!(store.get("stock-1-1-10").is_some());
        store.reject_hit("stock-1-1-10");

        let stats = store.stats();
        assert_eq!((stats.hits, stats.misses), (0, 1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalidate_missing_is_noop() {
        let (mut store, _) = store_with_clock();
        store.set("a", "1".to_string(), Ttl::Default);

        assert!(!store.invalidate("b"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().invalidations, 0);
    }

    #[test]
    fn test_never_expires_until_invalidated() {
        let (mut store, clock) = store_with_clock();

        store.set("marcas", "all".to_string(), Ttl::Never);
        clock.advance(Duration::from_secs(365 * 24 * 3600));

        assert!(store.get("marcas").is_some());
        assert_eq!(store.ttl_remaining("marcas"), Some(None));

        store.invalidate("marcas");
        assert!(store.get("marcas").is_none());
    }

    #[test]
    fn test_overwrite_replaces_value_and_expiration() {
        let (mut store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), Ttl::Never);
        store.set("key1", "value2".to_string(), Ttl::Millis(1_000));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key1").as_deref(), Some("value2"));

        clock.advance_ms(1_000);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_negative_ttl_is_absent_immediately() {
        let (mut store, _) = store_with_clock();

        store.set("key1", "value1".to_string(), Ttl::Millis(-500));
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (mut store, _) = store_with_clock();

        store.set("a", "1".to_string(), Ttl::Default);
        store.set("b", "2".to_string(), Ttl::Never);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.stats().invalidations, 2);
    }

    #[test]
    fn test_invalidate_prefix() {
        let (mut store, _) = store_with_clock();

        store.set("stock-1-1-10", "p1".to_string(), Ttl::Default);
        store.set("stock-1-2-10", "p2".to_string(), Ttl::Default);
        store.set("stock-12-1-10", "other".to_string(), Ttl::Default);
        store.set("movimientos-1-1-10", "m".to_string(), Ttl::Default);

        assert_eq!(store.invalidate_prefix("stock-1-"), 2);
        assert_eq!(store.len(), 2);
        assert!(store.get("stock-12-1-10").is_some());
        assert!(store.get("movimientos-1-1-10").is_some());
    }

    #[test]
    fn test_cleanup_expired() {
        let (mut store, clock) = store_with_clock();

        store.set("short", "1".to_string(), Ttl::Millis(1_000));
        store.set("long", "2".to_string(), Ttl::Millis(10_000));
        store.set("pinned", "3".to_string(), Ttl::Never);

        clock.advance_ms(1_100);

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().expirations, 1);
        assert!(store.get("long").is_some());
    }

    #[test]
    fn test_ttl_remaining() {
        let (mut store, clock) = store_with_clock();

        store.set("key", "v".to_string(), Ttl::Millis(10_000));
        clock.advance_ms(4_000);

        assert_eq!(
            store.ttl_remaining("key"),
            Some(Some(Duration::from_millis(6_000)))
        );
        assert_eq!(store.ttl_remaining("missing"), None);

        clock.advance_ms(6_000);
        assert_eq!(store.ttl_remaining("key"), None);
    }
}
