//! Narrow request DTOs for the PATCH endpoints.
//!
//! Full create/update payloads deserialize straight into the `Nuevo*`
//! models of `infopan-db`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CambiarEstadoRequest {
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct AjustarCantidadRequest {
    pub cantidad_actual: f64,
}
