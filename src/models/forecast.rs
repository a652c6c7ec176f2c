//! Demand forecast DTOs, shaped for the demand and coverage charts.

use serde::{Deserialize, Serialize};

use crate::models::RepuestoTaller;

/// Forecast of one part for one workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub repuesto_info: RepuestoTaller,
    pub stock_actual: f64,
    #[serde(default)]
    pub dias_de_stock_restantes: Option<f64>,
    pub grafico_demanda: GraficoDemanda,
    pub grafico_cobertura: GraficoCobertura,
}

/// Historic demand followed by the forecast band. Series are aligned with
/// `labels`; points before `split_index` are history, the rest forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraficoDemanda {
    #[serde(default)]
    pub historico: Vec<Option<f64>>,
    #[serde(default)]
    pub forecast_media: Vec<Option<f64>>,
    #[serde(default)]
    pub forecast_lower: Vec<Option<f64>>,
    #[serde(default)]
    pub forecast_upper: Vec<Option<f64>>,
    #[serde(default)]
    pub tendencia: Vec<f64>,
    #[serde(default)]
    pub split_index: usize,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl GraficoDemanda {
    /// Labels of the forecast part of the series.
    pub fn forecast_labels(&self) -> &[String] {
        self.labels.get(self.split_index..).unwrap_or(&[])
    }
}

/// Projected stock against projected demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraficoCobertura {
    #[serde(default)]
    pub stock_proyectado: Vec<f64>,
    #[serde(default)]
    pub demanda_proyectada: Vec<f64>,
    #[serde(default)]
    pub labels: Vec<String>,
}
