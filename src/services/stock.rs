//! Stock Service
//!
//! Stock levels, movements and demand forecasts of one workshop.

use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::api::{ApiClient, Query, Upload};
use crate::cache::{ResponseCache, Ttl};
use crate::error::Result;
use crate::models::{
    ForecastResponse, ForecastingFilter, Movimiento, MovimientosFilter, PagedResponse,
    RepuestoStock, StockFilter,
};

/// Cache key families holding per-workshop stock data.
const STOCK_FAMILIES: [&str; 4] = ["stock", "movimientos", "forecasting", "forecast"];

#[derive(Debug, Clone)]
pub struct StockService {
    api: ApiClient,
    cache: ResponseCache,
}

impl StockService {
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    // == Reads ==
    /// One page of stock movements. Cached with the default TTL.
    pub async fn movimientos(
        &self,
        taller_id: u64,
        page: u32,
        page_size: u32,
        filter: &MovimientosFilter,
    ) -> Result<PagedResponse<Movimiento>> {
        let query = filter.apply(Query::paged(page, page_size));
        let key = query.cache_key(&format!("movimientos-{taller_id}"));
        let endpoint = format!("talleres/{taller_id}/movimientos");

        self.cache
            .get_or_fetch(&key, Ttl::Default, || self.api.get(&endpoint, &query))
            .await
    }

    /// One page of aggregated stock per part. Cached with the default TTL.
    pub async fn stock(
        &self,
        taller_id: u64,
        page: u32,
        page_size: u32,
        filter: &StockFilter,
    ) -> Result<PagedResponse<RepuestoStock>> {
        let query = filter.apply(Query::paged(page, page_size));
        let key = query.cache_key(&format!("stock-{taller_id}"));
        let endpoint = format!("talleres/{taller_id}/stock");

        self.cache
            .get_or_fetch(&key, Ttl::Default, || self.api.get(&endpoint, &query))
            .await
    }

    /// One page of parts with forecasts. Cached with the default TTL.
    pub async fn forecasting_list(
        &self,
        taller_id: u64,
        page: u32,
        page_size: u32,
        filter: &ForecastingFilter,
    ) -> Result<PagedResponse<RepuestoStock>> {
        let query = filter.apply(Query::paged(page, page_size));
        let key = query.cache_key(&format!("forecasting-{taller_id}"));
        let endpoint = format!("talleres/{taller_id}/forecasting");

        self.cache
            .get_or_fetch(&key, Ttl::Default, || self.api.get(&endpoint, &query))
            .await
    }

    /// Demand forecast of one part. Cached with the default TTL.
    pub async fn forecast(&self, taller_id: u64, repuesto_taller_id: u64) -> Result<ForecastResponse> {
        let key = format!("forecast-{taller_id}-{repuesto_taller_id}");
        let endpoint = format!("talleres/{taller_id}/repuestos/{repuesto_taller_id}/forecasting");
        let query = Query::new();

        self.cache
            .get_or_fetch(&key, Ttl::Default, || self.api.get(&endpoint, &query))
            .await
    }

    // == Imports ==
    /// Uploads a movements file. `fecha` is applied to rows without a date.
    pub async fn importar_movimientos(
        &self,
        taller_id: u64,
        file: impl AsRef<Path>,
        fecha: Option<NaiveDate>,
    ) -> Result<Value> {
        let mut upload = Upload::new(file.as_ref()).field("taller_id", taller_id);
        if let Some(fecha) = fecha {
            upload = upload.field("defaultFecha", fecha.format("%Y-%m-%d"));
        }

        let result = self.api.upload("importaciones/movimientos", upload).await?;
        info!(taller_id, "Movements imported");
        self.invalidate_taller(taller_id).await;
        Ok(result)
    }

    /// Uploads the initial stock file of a workshop.
    pub async fn importar_stock_inicial(&self, taller_id: u64, file: impl AsRef<Path>) -> Result<Value> {
        let upload = Upload::new(file.as_ref()).field("taller_id", taller_id);

        let result = self.api.upload("importaciones/stock", upload).await?;
        info!(taller_id, "Initial stock imported");
        self.invalidate_taller(taller_id).await;
        Ok(result)
    }

    /// Drops every cached stock, movement and forecast page of a workshop.
    pub async fn invalidate_taller(&self, taller_id: u64) -> usize {
        let mut removed = 0;
        for family in STOCK_FAMILIES {
            removed += self
                .cache
                .invalidate_prefix(&format!("{family}-{taller_id}-"))
                .await;
        }
        removed
    }
}
