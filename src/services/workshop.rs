//! Workshop Service
//!
//! Warehouses, workshop groups and users. Reads are cached; every
//! mutation drops the entries it could have made stale.

use serde_json::{json, Value};

use crate::api::{ApiClient, Query};
use crate::cache::{ResponseCache, Ttl};
use crate::error::Result;
use crate::models::{Deposito, Grupo, GrupoInput, Usuario};

const GRUPOS_KEY: &str = "grupos";
const USUARIOS_KEY: &str = "usuarios";

#[derive(Debug, Clone)]
pub struct WorkshopService {
    api: ApiClient,
    cache: ResponseCache,
}

impl WorkshopService {
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    // == Warehouses ==
    pub async fn depositos_por_taller(&self, taller_id: u64) -> Result<Vec<Deposito>> {
        self.cached_get(
            &format!("depositos-taller-{taller_id}"),
            &format!("talleres/{taller_id}/depositos"),
        )
        .await
    }

    pub async fn depositos_por_grupo(&self, grupo_id: u64) -> Result<Vec<Deposito>> {
        self.cached_get(
            &format!("depositos-grupo-{grupo_id}"),
            &format!("grupos/{grupo_id}/depositos"),
        )
        .await
    }

    // == Groups ==
    pub async fn grupos(&self) -> Result<Vec<Grupo>> {
        self.cached_get(GRUPOS_KEY, "grupos/").await
    }

    pub async fn grupo(&self, grupo_id: u64) -> Result<Grupo> {
        self.cached_get(&format!("grupo-{grupo_id}"), &format!("grupos/{grupo_id}/"))
            .await
    }

    pub async fn crear_grupo(&self, grupo: &GrupoInput) -> Result<Grupo> {
        let created = self.api.post("grupos/", grupo).await?;
        self.invalidate_grupos().await;
        Ok(created)
    }

    pub async fn editar_grupo(&self, grupo_id: u64, grupo: &GrupoInput) -> Result<Grupo> {
        let updated = self.api.put(&format!("grupos/{grupo_id}/"), grupo).await?;
        self.invalidate_grupos().await;
        Ok(updated)
    }

    pub async fn eliminar_grupo(&self, grupo_id: u64) -> Result<()> {
        self.api.delete(&format!("grupos/{grupo_id}/")).await?;
        self.invalidate_grupos().await;
        Ok(())
    }

    pub async fn asignar_taller(&self, grupo_id: u64, taller_id: u64) -> Result<Value> {
        let result = self
            .api
            .post(
                &format!("grupos/{grupo_id}/asignar_taller/"),
                &json!({ "taller_id": taller_id }),
            )
            .await?;
        self.invalidate_grupos().await;
        Ok(result)
    }

    pub async fn desasignar_taller(&self, grupo_id: u64, taller_id: u64) -> Result<Value> {
        let result = self
            .api
            .post(
                &format!("grupos/{grupo_id}/desasignar_taller/"),
                &json!({ "taller_id": taller_id }),
            )
            .await?;
        self.invalidate_grupos().await;
        Ok(result)
    }

    // == Users ==
    pub async fn usuarios(&self) -> Result<Vec<Usuario>> {
        self.cached_get(USUARIOS_KEY, "usuarios/").await
    }

    pub async fn usuario(&self, usuario_id: u64) -> Result<Usuario> {
        self.cached_get(
            &format!("usuario-{usuario_id}"),
            &format!("usuarios/{usuario_id}/"),
        )
        .await
    }

    /// Registers a new user.
    pub async fn crear_usuario(&self, usuario: &Usuario) -> Result<Usuario> {
        let created = self.api.post("register/", usuario).await?;
        self.cache.invalidate(USUARIOS_KEY).await;
        Ok(created)
    }

    pub async fn editar_usuario(&self, usuario_id: u64, usuario: &Usuario) -> Result<Usuario> {
        let updated = self
            .api
            .put(&format!("usuarios/{usuario_id}/"), usuario)
            .await?;
        self.invalidate_usuario(usuario_id).await;
        Ok(updated)
    }

    pub async fn eliminar_usuario(&self, usuario_id: u64) -> Result<()> {
        self.api.delete(&format!("usuarios/{usuario_id}/")).await?;
        self.invalidate_usuario(usuario_id).await;
        Ok(())
    }

    // == Internals ==
    async fn cached_get<T>(&self, key: &str, endpoint: &str) -> Result<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let query = Query::new();
        self.cache
            .get_or_fetch(key, Ttl::Default, || self.api.get(endpoint, &query))
            .await
    }

    /// Group membership also decides which warehouses a group sees.
    async fn invalidate_grupos(&self) {
        self.cache.invalidate(GRUPOS_KEY).await;
        self.cache.invalidate_prefix("grupo-").await;
        self.cache.invalidate_prefix("depositos-grupo-").await;
    }

    async fn invalidate_usuario(&self, usuario_id: u64) {
        self.cache.invalidate(USUARIOS_KEY).await;
        self.cache.invalidate(&format!("usuario-{usuario_id}")).await;
    }
}
