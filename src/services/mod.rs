//! Services Module
//!
//! Typed access to each area of the inventory API. Services are cheap to
//! clone and share one [`crate::cache::ResponseCache`].

mod alerts;
mod auth;
mod catalog;
mod locator;
mod stock;
mod workshop;

pub use alerts::{AlertService, DEFAULT_ALERT_PAGE_SIZE};
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use locator::LocatorService;
pub use stock::StockService;
pub use workshop::WorkshopService;
