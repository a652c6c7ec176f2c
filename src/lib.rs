//! Stockifai - Workshop inventory API client
//!
//! Typed access to the inventory REST API with an in-memory TTL response
//! cache in front of its idempotent reads.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod tasks;

pub use api::ApiClient;
pub use cache::{ResponseCache, Ttl};
pub use config::Config;
pub use error::{ApiError, Result};
pub use state::AppState;
pub use tasks::{spawn_alert_summary_poller, spawn_cleanup_task};
