//! Wire models for the inventory REST API
//!
//! Field names follow the backend's JSON so the DTOs deserialize without
//! renaming, except where the backend itself uses camelCase.

mod alert;
mod catalog;
mod filters;
mod forecast;
mod locator;
mod paged;
mod session;
mod stock;
mod workshop;

// Re-export commonly used types
pub use alert::{Alerta, AlertasResumen, EstadoAlerta, NivelAlerta};
pub use catalog::{Categoria, Marca, Repuesto};
pub use filters::{ForecastingFilter, MovimientosFilter, RepuestosFilter, StockFilter};
pub use forecast::{ForecastResponse, GraficoCobertura, GraficoDemanda};
pub use locator::{
    LocalizadorGrupo, LocalizadorRepuestoResumen, LocalizadorRespuesta, LocalizadorTaller,
    TallerOrigen,
};
pub use paged::PagedResponse;
pub use session::{LoginRequest, LoginResponse, LogoutResponse, SessionStatus, SessionUser};
pub use stock::{Movimiento, RepuestoStock, RepuestoTaller, StockDepositoDetalle};
pub use workshop::{Deposito, Grupo, GrupoInput, Taller, TallerResumen, Usuario};
