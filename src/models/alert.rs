//! Alert DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::RepuestoTaller;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NivelAlerta {
    Critico,
    Medio,
    Advertencia,
    Informativo,
}

impl NivelAlerta {
    pub fn as_str(self) -> &'static str {
        match self {
            NivelAlerta::Critico => "CRITICO",
            NivelAlerta::Medio => "MEDIO",
            NivelAlerta::Advertencia => "ADVERTENCIA",
            NivelAlerta::Informativo => "INFORMATIVO",
        }
    }

    /// Comma-separated form used by the `niveles` query parameter.
    pub fn join(niveles: &[NivelAlerta]) -> String {
        niveles
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for NivelAlerta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoAlerta {
    Nueva,
    Vista,
    Descartada,
    Resuelta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alerta {
    pub id: u64,
    pub repuesto_taller: RepuestoTaller,
    pub nivel: NivelAlerta,
    pub codigo: String,
    pub mensaje: String,
    pub estado: EstadoAlerta,
    pub fecha_creacion: String,
    #[serde(default)]
    pub datos_snapshot: Option<serde_json::Value>,
}

/// Alert counters per level for one workshop. Missing counters read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertasResumen {
    #[serde(rename = "CRITICO", default)]
    pub critico: u64,
    #[serde(rename = "MEDIO", default)]
    pub medio: u64,
    #[serde(rename = "ADVERTENCIA", default)]
    pub advertencia: u64,
    #[serde(rename = "INFORMATIVO", default)]
    pub informativo: u64,
    #[serde(rename = "TOTAL_URGENTE", default)]
    pub total_urgente: u64,
}
