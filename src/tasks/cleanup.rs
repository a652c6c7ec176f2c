//! Cache Sweeper
//!
//! Reads already ignore stale entries; the sweep frees the memory of keys
//! nobody asks for again (old pages, abandoned filters).

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a task that purges stale entries from `cache` every `interval`.
///
/// The first sweep runs one full interval after spawning. Abort the
/// returned handle on shutdown.
pub fn spawn_cleanup_task(cache: ResponseCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache sweeper");

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let removed = cache.cleanup_expired().await;
            if removed == 0 {
                debug!("Cache sweep found nothing stale");
                continue;
            }

            let remaining = cache.len().await;
            info!(removed, remaining, "Cache sweep");
        }
    })
}
