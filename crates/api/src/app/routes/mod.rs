//! One router per entity, nested under `/api` by `app::build_app`.

pub mod anunciantes;
pub mod distribuciones;
pub mod facturas;
pub mod franquiciados;
pub mod inventario;
pub mod ordenes_produccion;
pub mod pagos_franquicia;
pub mod panaderias;

use crate::app::errors::ApiError;

/// Validate a PATCH estado value against the entity's whitelist.
pub(crate) fn validar_estado(estado: &str, permitidos: &[&str]) -> Result<(), ApiError> {
    if permitidos.contains(&estado) {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Estado inválido: {estado}. Valores permitidos: {}",
            permitidos.join(", ")
        )))
    }
}
