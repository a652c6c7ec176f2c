//! Shared Response Cache
//!
//! The handle every service holds. Wraps one [`CacheStore`] of JSON values
//! behind `Arc<RwLock<..>>` and adds the fetch-on-miss helper.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock, Ttl};

/// Default freshness window for cached API reads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(20 * 60);

/// Default minimum latency of a cache hit.
pub const DEFAULT_HIT_DELAY: Duration = Duration::from_millis(120);

// == Response Cache ==
/// Cloneable handle to the process-wide response cache.
///
/// Values are kept as JSON so one store can serve every endpoint; they are
/// decoded back into the caller's type on a hit. The lock is only held for
/// the duration of a single store operation and never across a fetch.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    store: Arc<RwLock<CacheStore<Value>>>,
    /// Delay applied before returning a hit, so cached and fetched results
    /// reach callers with similar timing
    hit_delay: Duration,
}

impl ResponseCache {
    // == Constructors ==
    /// Creates a cache on the system clock with no hit delay.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::with_clock(default_ttl, clock))),
            hit_delay: Duration::ZERO,
        }
    }

    /// Sets the minimum latency of a hit. `Duration::ZERO` disables it.
    pub fn with_hit_delay(mut self, hit_delay: Duration) -> Self {
        self.hit_delay = hit_delay;
        self
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.cache_default_ttl).with_hit_delay(config.cache_hit_delay)
    }

    // == Get ==
    /// Looks up `key` and decodes the stored value as `T`.
    ///
    /// A value that no longer decodes as `T` is dropped and counted as a
    /// miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut store = self.store.write().await;
        let value = store.get(key)?;

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                store.reject_hit(key);
                warn!(key, error = %err, "Cached value does not match requested type");
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// A value that cannot be encoded is skipped with a warning.
    pub async fn set<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Ttl) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => self.store.write().await.set(key, json, ttl),
            Err(err) => warn!(key = %key, error = %err, "Skipping cache write for unserializable value"),
        }
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// successful result.
    ///
    /// Errors from `fetch` are returned to the caller and never stored.
    /// Two concurrent misses on the same key both fetch; the later write
    /// wins.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, ttl: Ttl, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key).await {
            debug!(key, "Cache hit");
            if !self.hit_delay.is_zero() {
                tokio::time::sleep(self.hit_delay).await;
            }
            return Ok(hit);
        }

        debug!(key, "Cache miss, fetching");
        let fresh = fetch().await?;
        self.set(key, &fresh, ttl).await;
        Ok(fresh)
    }

    // == Invalidation ==
    /// Removes the entry for `key`, if any.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.store.write().await.invalidate(key)
    }

    /// Removes every entry whose key starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let removed = self.store.write().await.invalidate_prefix(prefix);
        if removed > 0 {
            debug!(prefix, removed, "Invalidated cache entries");
        }
        removed
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Maintenance ==
    /// Purges stale entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
