//! Stock DTOs: a part as stocked by one workshop, stock levels per
//! warehouse, and stock movements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Deposito, Repuesto, Taller};

/// A catalog part as carried by one workshop, with its pricing and the
/// backend's demand predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepuestoTaller {
    pub id_repuesto_taller: u64,
    pub repuesto: Repuesto,
    #[serde(default)]
    pub taller: Option<Taller>,
    #[serde(default)]
    pub precio: Option<f64>,
    #[serde(default)]
    pub costo: Option<f64>,
    #[serde(default)]
    pub original: bool,
    #[serde(default)]
    pub pred_1: Option<f64>,
    #[serde(default)]
    pub pred_2: Option<f64>,
    #[serde(default)]
    pub pred_3: Option<f64>,
    #[serde(default)]
    pub pred_4: Option<f64>,
    /// Minimum stock; the backend defaults it to the first prediction
    #[serde(default)]
    pub cantidad_minima: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDepositoDetalle {
    pub deposito: Deposito,
    pub cantidad: f64,
}

/// Aggregated stock of one part across the workshop's warehouses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepuestoStock {
    pub repuesto_taller: RepuestoTaller,
    pub stock_total: f64,
    #[serde(default)]
    pub depositos: Vec<StockDepositoDetalle>,
}

impl RepuestoStock {
    /// Whether total stock is below the configured minimum.
    ///
    /// Returns `None` when the part has no minimum.
    pub fn esta_bajo_minimo(&self) -> Option<bool> {
        self.repuesto_taller
            .cantidad_minima
            .map(|min| self.stock_total < min)
    }
}

/// A single stock movement (inbound, outbound, adjustment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movimiento {
    pub id: u64,
    /// ISO date or datetime as sent by the backend
    pub fecha: String,
    pub tipo: String,
    pub cantidad: f64,
    pub deposito: Deposito,
    pub repuesto: Repuesto,
    #[serde(default)]
    pub externo_id: Option<u64>,
    #[serde(default)]
    pub documento: Option<String>,
}

impl Movimiento {
    /// Calendar date of the movement, if `fecha` parses.
    pub fn fecha_dia(&self) -> Option<NaiveDate> {
        self.fecha
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repuesto_stock(stock_total: f64, cantidad_minima: Option<f64>) -> RepuestoStock {
        let json = serde_json::json!({
            "repuesto_taller": {
                "id_repuesto_taller": 7,
                "repuesto": {"numero_pieza": "FO-123", "descripcion": "Filtro de aceite", "estado": "ACTIVO"},
                "precio": 1500.0,
                "costo": 900.0,
                "original": true,
                "cantidad_minima": cantidad_minima
            },
            "stock_total": stock_total,
            "depositos": [{"deposito": {"id": 1, "nombre": "Central"}, "cantidad": stock_total}]
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_below_minimum() {
        assert_eq!(repuesto_stock(3.0, Some(5.0)).esta_bajo_minimo(), Some(true));
        assert_eq!(repuesto_stock(5.0, Some(5.0)).esta_bajo_minimo(), Some(false));
        assert_eq!(repuesto_stock(0.0, None).esta_bajo_minimo(), None);
    }

    #[test]
    fn test_movimiento_fecha_dia() {
        let json = serde_json::json!({
            "id": 1,
            "fecha": "2024-03-15T10:30:00Z",
            "tipo": "EGRESO",
            "cantidad": 2,
            "deposito": {"id": 1, "nombre": "Central", "taller_id": 1},
            "repuesto": {"numero_pieza": "FO-123"}
        });
        let movimiento: Movimiento = serde_json::from_value(json).unwrap();

        assert_eq!(movimiento.fecha_dia(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(movimiento.documento.is_none());
    }
}
