//! API Module
//!
//! Outbound access to the inventory REST API.

mod client;
mod query;

pub use client::{ApiClient, Upload};
pub use query::{Query, PAGE, PAGE_SIZE};
