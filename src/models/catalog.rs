//! Catalog DTOs: brands, categories and parts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marca {
    pub id: u64,
    pub nombre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: u64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
}

/// A part in the shared catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repuesto {
    pub numero_pieza: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub marca: Option<Marca>,
    #[serde(default)]
    pub categoria: Option<Categoria>,
}
