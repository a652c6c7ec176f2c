//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and the TTL policy
//! applied when they are written.

use std::time::Duration;

// == TTL Policy ==
/// How long a written entry stays visible.
///
/// Keeps "argument not given" apart from "never expire": callers that say
/// nothing get the store's default, callers that want a pinned entry must
/// ask for [`Ttl::Never`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Use the store's configured default TTL.
    #[default]
    Default,
    /// Never expires; only `invalidate` or `clear` remove the entry.
    Never,
    /// Expires this many milliseconds after the write.
    /// Zero or negative values produce an entry that is already expired.
    Millis(i64),
}

impl Ttl {
    /// Resolves the policy into an absolute expiration timestamp.
    ///
    /// # Returns
    /// - `None` if the entry never expires
    /// - `Some(expires_at_ms)` otherwise
    pub fn expires_at(self, now_ms: u64, default_ttl: Duration) -> Option<u64> {
        match self {
            Ttl::Default => Some(now_ms.saturating_add(millis_saturating(default_ttl))),
            Ttl::Never => None,
            Ttl::Millis(ms) => Some(now_ms.saturating_add_signed(ms)),
        }
    }
}

fn millis_saturating(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl From<Duration> for Ttl {
    fn from(ttl: Duration) -> Self {
        Ttl::Millis(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
    }
}

impl From<Option<Duration>> for Ttl {
    /// `None` maps to [`Ttl::Never`], not to the default.
    fn from(ttl: Option<Duration>) -> Self {
        ttl.map_or(Ttl::Never, Ttl::from)
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now_ms`.
    pub fn new(value: V, now_ms: u64, expires_at: Option<u64>) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time reaches its expiration
    /// time, so a read exactly at `created_at + ttl` already misses.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// Expired entries report `Some(Duration::ZERO)`.
    pub fn ttl_remaining(&self, now_ms: u64) -> Option<Duration> {
        self.expires_at
            .map(|expires| Duration::from_millis(expires.saturating_sub(now_ms)))
    }
}
