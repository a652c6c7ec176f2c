//! Cache Module
//!
//! Provides the in-memory TTL cache that sits in front of idempotent API
//! reads.

mod clock;
mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, Ttl};
pub use shared::{ResponseCache, DEFAULT_HIT_DELAY, DEFAULT_TTL};
pub use stats::CacheStats;
pub use store::CacheStore;
