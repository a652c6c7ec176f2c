//! Locator Service
//!
//! Finds which workshops hold a given part number. Quantities move with
//! every sale, so results are not cached.

use serde_json::Value;

use crate::api::{ApiClient, Query};
use crate::error::Result;
use crate::models::LocalizadorRespuesta;

#[derive(Debug, Clone)]
pub struct LocatorService {
    api: ApiClient,
}

impl LocatorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Looks up `numero_pieza` (trimmed) from the point of view of
    /// `taller_id`.
    pub async fn buscar_por_numero_parte(
        &self,
        taller_id: u64,
        numero_pieza: &str,
    ) -> Result<LocalizadorRespuesta> {
        let query = Query::new().set("numero_pieza", numero_pieza.trim());
        let raw: Value = self
            .api
            .get(&format!("talleres/{taller_id}/localizador"), &query)
            .await?;

        Ok(LocalizadorRespuesta::from_raw(&raw))
    }
}
