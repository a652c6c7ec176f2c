//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the client.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals
//! - Alert Summary: Polls the alert counters of a workshop

mod alerts;
mod cleanup;

pub use alerts::{spawn_alert_summary_poller, AlertSummaryPoller};
pub use cleanup::spawn_cleanup_task;
