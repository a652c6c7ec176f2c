//! Alert Service
//!
//! Alert lists and per-level counters. Alerts change as stock moves and
//! are polled, so none of these reads go through the cache.

use tracing::warn;

use crate::api::{ApiClient, Query, PAGE, PAGE_SIZE};
use crate::error::Result;
use crate::models::{Alerta, AlertasResumen, NivelAlerta, PagedResponse};

/// Page size used by the alert views.
pub const DEFAULT_ALERT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct AlertService {
    api: ApiClient,
}

impl AlertService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Alerts of a workshop restricted to `niveles`.
    pub async fn alertas(
        &self,
        taller_id: u64,
        niveles: &[NivelAlerta],
        page: u32,
        page_size: u32,
    ) -> Result<PagedResponse<Alerta>> {
        let endpoint = format!("talleres/{taller_id}/alertas/");
        self.api
            .get(&endpoint, &Self::list_query(niveles, page, page_size))
            .await
    }

    /// Alerts of one part of a workshop.
    pub async fn alertas_por_repuesto(
        &self,
        taller_id: u64,
        repuesto_taller_id: u64,
        niveles: &[NivelAlerta],
        page: u32,
        page_size: u32,
    ) -> Result<PagedResponse<Alerta>> {
        let endpoint = format!("talleres/{taller_id}/repuestos/{repuesto_taller_id}/alertas/");
        self.api
            .get(&endpoint, &Self::list_query(niveles, page, page_size))
            .await
    }

    pub async fn dismiss(&self, alerta_id: u64) -> Result<()> {
        self.api
            .post_empty(&format!("alertas/{alerta_id}/dismiss/"))
            .await
    }

    pub async fn mark_as_seen(&self, alerta_id: u64) -> Result<()> {
        self.api
            .post_empty(&format!("alertas/{alerta_id}/mark-as-seen/"))
            .await
    }

    /// Alert counters of a workshop.
    ///
    /// Never fails: an unreachable or erroring backend yields an all-zero
    /// summary so badges simply show nothing.
    pub async fn resumen(&self, taller_id: u64) -> AlertasResumen {
        let endpoint = format!("talleres/{taller_id}/alertas/");
        let query = Query::new().set("summary", 1);

        match self.api.get::<AlertasResumen>(&endpoint, &query).await {
            Ok(resumen) => resumen,
            Err(err) => {
                warn!(taller_id, error = %err, "Alert summary unavailable");
                AlertasResumen::default()
            }
        }
    }

    fn list_query(niveles: &[NivelAlerta], page: u32, page_size: u32) -> Query {
        Query::new()
            .set("niveles", NivelAlerta::join(niveles))
            .set(PAGE, page)
            .set(PAGE_SIZE, page_size)
    }
}
