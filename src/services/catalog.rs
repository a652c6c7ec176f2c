//! Catalog Service
//!
//! Brands, categories and the shared parts catalog.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::api::{ApiClient, Query, Upload};
use crate::cache::{ResponseCache, Ttl};
use crate::error::Result;
use crate::models::{Categoria, Marca, PagedResponse, Repuesto, RepuestosFilter};

const MARCAS_KEY: &str = "marcas";
const CATEGORIAS_KEY: &str = "categorias";
const REPUESTOS_PREFIX: &str = "repuestos";

#[derive(Debug, Clone)]
pub struct CatalogService {
    api: ApiClient,
    cache: ResponseCache,
}

impl CatalogService {
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    /// All brands. Kept until the next catalog import.
    pub async fn marcas(&self) -> Result<Vec<Marca>> {
        let query = Query::new();
        self.cache
            .get_or_fetch(MARCAS_KEY, Ttl::Never, || self.api.get("marcas", &query))
            .await
    }

    /// All categories. Kept until the next catalog import.
    pub async fn categorias(&self) -> Result<Vec<Categoria>> {
        let query = Query::new();
        self.cache
            .get_or_fetch(CATEGORIAS_KEY, Ttl::Never, || self.api.get("categorias", &query))
            .await
    }

    /// One page of catalog parts. Cached with the default TTL.
    pub async fn repuestos(
        &self,
        page: u32,
        page_size: u32,
        filter: &RepuestosFilter,
    ) -> Result<PagedResponse<Repuesto>> {
        let query = filter.apply(Query::paged(page, page_size));
        let key = query.cache_key(REPUESTOS_PREFIX);

        self.cache
            .get_or_fetch(&key, Ttl::Default, || self.api.get("repuestos", &query))
            .await
    }

    /// Uploads a catalog file and drops every cached catalog read.
    pub async fn importar_catalogo(&self, file: impl AsRef<Path>) -> Result<Value> {
        let result = self
            .api
            .upload("importaciones/catalogo", Upload::new(file.as_ref()))
            .await?;

        info!("Catalog imported");
        self.cache.invalidate(MARCAS_KEY).await;
        self.cache.invalidate(CATEGORIAS_KEY).await;
        self.cache.invalidate_prefix(REPUESTOS_PREFIX).await;
        Ok(result)
    }

    /// Uploads a price list for one workshop.
    pub async fn importar_precios(&self, taller_id: u64, file: impl AsRef<Path>) -> Result<Value> {
        let upload = Upload::new(file.as_ref()).field("taller_id", taller_id);
        let result = self.api.upload("importaciones/precios", upload).await?;

        info!(taller_id, "Prices imported");
        // Prices travel inside the stock and forecast payloads
        for family in ["stock", "forecasting", "forecast"] {
            self.cache
                .invalidate_prefix(&format!("{family}-{taller_id}-"))
                .await;
        }
        Ok(result)
    }
}
