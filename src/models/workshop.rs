//! Workshop, warehouse, group and user DTOs.

use serde::{Deserialize, Serialize};

/// A workshop (tenant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taller {
    #[serde(default)]
    pub id: Option<u64>,
    pub nombre: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub direccion_normalizada: Option<String>,
    #[serde(default)]
    pub direccion_validada: Option<bool>,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub telefono_e164: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    pub stock_inicial_cargado: bool,
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
}

/// A warehouse belonging to one workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposito {
    pub id: u64,
    pub nombre: String,
    #[serde(default)]
    pub taller_id: Option<u64>,
}

/// Minimal workshop reference nested in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallerResumen {
    pub id: u64,
    pub nombre: String,
}

/// A group of workshops. Groups nest through `grupo_padre`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grupo {
    pub id_grupo: u64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub grupo_padre: Option<u64>,
    #[serde(default)]
    pub talleres: Vec<TallerResumen>,
}

/// Body for creating or editing a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrupoInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grupo_padre: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taller: Option<Taller>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grupo: Option<serde_json::Value>,
}
