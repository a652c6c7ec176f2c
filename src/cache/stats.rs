//! Cache Statistics Module
//!
//! Counters describing how well the response cache is doing: lookups that
//! avoided a network round trip, and why entries left the store.

use serde::Serialize;

/// Why entries left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// TTL elapsed, found on read or by the sweeper
    Expired,
    /// Dropped by `invalidate`, `invalidate_prefix` or `clear`
    Invalidated,
}

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to go to the API (absent or stale)
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    /// Entries held when the snapshot was taken, stale ones included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups answered from the cache, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    /// Turns the last recorded hit into a miss, for a value the caller
    /// could not use.
    pub(crate) fn reclassify_hit_as_miss(&mut self) {
        self.hits = self.hits.saturating_sub(1);
        self.misses += 1;
    }

    pub(crate) fn record_removed(&mut self, cause: Removal, count: usize) {
        let counter = match cause {
            Removal::Expired => &mut self.expirations,
            Removal::Invalidated => &mut self.invalidations,
        };
        *counter += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_have_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = CacheStats::new();
        for hit in [true, true, true, false] {
            stats.record_lookup(hit);
        }
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_reclassified_hit() {
        let mut stats = CacheStats::new();
        stats.record_lookup(true);
        stats.reclassify_hit_as_miss();

        assert_eq!((stats.hits, stats.misses), (0, 1));
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_removals_are_counted_by_cause() {
        let mut stats = CacheStats::new();
        stats.record_removed(Removal::Expired, 2);
        stats.record_removed(Removal::Expired, 1);
        stats.record_removed(Removal::Invalidated, 4);
        stats.record_removed(Removal::Invalidated, 0);

        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.invalidations, 4);
    }
}
