//! Filters for list endpoints.
//!
//! Each filter appends its non-empty values to a [`Query`] in a fixed
//! order, which keeps cache keys stable for equal filters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Query;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter for the movements list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovimientosFilter {
    pub deposito_id: Option<u64>,
    pub search_text: Option<String>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

impl MovimientosFilter {
    pub fn apply(&self, query: Query) -> Query {
        query
            .set_opt("deposito_id", self.deposito_id)
            .set_opt("search_text", self.search_text.as_deref())
            .set_opt("date_from", self.desde.map(|d| d.format(DATE_FORMAT)))
            .set_opt("date_to", self.hasta.map(|d| d.format(DATE_FORMAT)))
    }
}

/// Filter for the stock list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockFilter {
    pub search_text: Option<String>,
    pub categoria_id: Option<u64>,
}

impl StockFilter {
    pub fn apply(&self, query: Query) -> Query {
        query
            .set_opt("q", self.search_text.as_deref())
            .set_opt("categoria_id", self.categoria_id)
    }
}

/// Filter for the forecasting list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastingFilter {
    pub search_text: Option<String>,
}

impl ForecastingFilter {
    pub fn apply(&self, query: Query) -> Query {
        query.set_opt("q", self.search_text.as_deref())
    }
}

/// Filter for the catalog parts list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepuestosFilter {
    pub search_text: Option<String>,
    pub marca_id: Option<u64>,
    pub categoria_id: Option<u64>,
}

impl RepuestosFilter {
    pub fn apply(&self, query: Query) -> Query {
        query
            .set_opt("marca_id", self.marca_id)
            .set_opt("categoria_id", self.categoria_id)
            .set_opt("search_text", self.search_text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movimientos_filter_formats_dates() {
        let filter = MovimientosFilter {
            deposito_id: Some(3),
            search_text: None,
            desde: NaiveDate::from_ymd_opt(2024, 1, 5),
            hasta: NaiveDate::from_ymd_opt(2024, 2, 1),
        };
        let query = filter.apply(Query::paged(1, 10));

        assert_eq!(query.get("deposito_id"), Some("3"));
        assert_eq!(query.get("search_text"), None);
        assert_eq!(query.get("date_from"), Some("2024-01-05"));
        assert_eq!(query.get("date_to"), Some("2024-02-01"));
    }

    #[test]
    fn test_empty_filter_leaves_query_untouched() {
        let query = StockFilter::default().apply(Query::paged(1, 10));
        assert_eq!(query, Query::paged(1, 10));
    }

    #[test]
    fn test_repuestos_filter_order() {
        let filter = RepuestosFilter {
            search_text: Some("bujia".into()),
            marca_id: Some(2),
            categoria_id: Some(8),
        };
        let key = filter.apply(Query::paged(1, 10)).cache_key("repuestos");
        assert_eq!(key, "repuestos-1-10-marca_id=2-categoria_id=8-search_text=bujia");
    }
}
