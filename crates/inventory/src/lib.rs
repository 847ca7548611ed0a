//! Inventory domain module (stock thresholds).
//!
//! Pure classification rules for stock items; the SQL layer mirrors the same
//! predicates in `WHERE` clauses for the alert endpoints.

pub mod stock;

pub use stock::{NivelStock, clasificar_stock, es_sobre_stock, es_stock_bajo};
