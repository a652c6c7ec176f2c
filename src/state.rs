//! Application State
//!
//! One API client and one response cache, shared by every service built
//! from them.

use crate::api::ApiClient;
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::Result;
use crate::services::{
    AlertService, AuthService, CatalogService, LocatorService, StockService, WorkshopService,
};

/// Shared client state.
///
/// Cloning shares the same connection pool, session and cache.
#[derive(Debug, Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub cache: ResponseCache,
}

impl AppState {
    /// Creates a new AppState from an existing client and cache.
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ApiClient::from_config(config)?,
            ResponseCache::from_config(config),
        ))
    }

    pub fn stock(&self) -> StockService {
        StockService::new(self.api.clone(), self.cache.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.api.clone(), self.cache.clone())
    }

    pub fn workshops(&self) -> WorkshopService {
        WorkshopService::new(self.api.clone(), self.cache.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone(), self.cache.clone())
    }

    pub fn alerts(&self) -> AlertService {
        AlertService::new(self.api.clone())
    }

    pub fn locator(&self) -> LocatorService {
        LocatorService::new(self.api.clone())
    }
}
