//! Invoicing domain module (facturas and cobros).
//!
//! This crate contains the invoice lifecycle rules — IVA computation, balance
//! tracking and status transitions — implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod factura;

pub use factura::{
    AplicacionCobro, EstadoFactura, FacturaTotales, IVA_PORCENTAJE_DEFAULT, aplicar_cobro,
    derivar_estado, estado_tras_edicion,
};
