//! Parts locator DTOs.
//!
//! The locator endpoint is loosely typed: coordinates and distances may
//! arrive as numbers, numeric strings, empty strings or nulls. The raw
//! JSON is normalised here into [`LocalizadorRespuesta`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizadorGrupo {
    pub id: u64,
    pub nombre: String,
    pub descripcion: String,
    pub es_subgrupo: bool,
    pub grupo_padre_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizadorRepuestoResumen {
    pub id: u64,
    pub numero_pieza: String,
    pub descripcion: Option<String>,
}

/// A workshop that holds the part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizadorTaller {
    pub id: u64,
    pub nombre: String,
    pub direccion: String,
    pub direccion_normalizada: Option<String>,
    pub telefono: Option<String>,
    pub telefono_e164: Option<String>,
    pub email: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub cantidad: f64,
    pub distancia_km: Option<f64>,
    pub grupos: Vec<LocalizadorGrupo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallerOrigen {
    pub id: u64,
    pub nombre: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

/// Normalised locator result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizadorRespuesta {
    pub repuesto: LocalizadorRepuestoResumen,
    pub taller_origen: TallerOrigen,
    pub total_cantidad: f64,
    pub talleres: Vec<LocalizadorTaller>,
}

impl LocalizadorRespuesta {
    /// Normalises a raw locator response. Never fails: absent fields take
    /// empty defaults.
    pub fn from_raw(raw: &Value) -> Self {
        let talleres: Vec<LocalizadorTaller> = raw["talleres"]
            .as_array()
            .map(|items| items.iter().map(taller_from_raw).collect())
            .unwrap_or_default();

        let total_cantidad = nullable_number(&raw["total_cantidad"])
            .unwrap_or_else(|| talleres.iter().map(|t| t.cantidad).sum());

        let repuesto = &raw["repuesto"];
        let origen = &raw["taller_origen"];

        Self {
            repuesto: LocalizadorRepuestoResumen {
                id: id_of(&repuesto["id"]),
                numero_pieza: string_of(&repuesto["numero_pieza"]),
                descripcion: optional_string(&repuesto["descripcion"]),
            },
            taller_origen: TallerOrigen {
                id: id_of(&origen["id"]),
                nombre: string_of(&origen["nombre"]),
                latitud: nullable_number(&origen["latitud"]),
                longitud: nullable_number(&origen["longitud"]),
            },
            total_cantidad,
            talleres,
        }
    }
}

fn taller_from_raw(raw: &Value) -> LocalizadorTaller {
    LocalizadorTaller {
        id: id_of(&raw["id"]),
        nombre: string_of(&raw["nombre"]),
        direccion: string_of(&raw["direccion"]),
        direccion_normalizada: optional_string(&raw["direccion_normalizada"]),
        telefono: optional_string(&raw["telefono"]),
        telefono_e164: optional_string(&raw["telefono_e164"]),
        email: optional_string(&raw["email"]),
        lat: nullable_number(&raw["latitud"]),
        lng: nullable_number(&raw["longitud"]),
        cantidad: nullable_number(&raw["cantidad"]).unwrap_or(0.0),
        distancia_km: nullable_number(&raw["distancia_km"]),
        grupos: raw["grupos"]
            .as_array()
            .map(|items| items.iter().map(grupo_from_raw).collect())
            .unwrap_or_default(),
    }
}

fn grupo_from_raw(raw: &Value) -> LocalizadorGrupo {
    LocalizadorGrupo {
        id: id_of(&raw["id"]),
        nombre: string_of(&raw["nombre"]),
        descripcion: string_of(&raw["descripcion"]),
        es_subgrupo: truthy(&raw["es_subgrupo"]),
        grupo_padre_id: nullable_number(&raw["grupo_padre_id"])
            .filter(|n| *n >= 0.0)
            .map(|n| n as u64),
    }
}

/// Reads a number or numeric string. Null, blank and non-finite values
/// become `None`.
pub(crate) fn nullable_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Loose boolean: `true`, non-zero numbers and non-empty strings.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

fn id_of(value: &Value) -> u64 {
    nullable_number(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64)
        .unwrap_or(0)
}

fn string_of(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn optional_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}
