use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};

use infopan_db::Database;
use infopan_db::models::NuevoPagoFranquicia;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["pendiente", "confirmado", "rechazado"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/franquiciado/:id", get(listar_por_franquiciado))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.pagos_franquicia().listar().await?;
    Ok(errors::ok(filas))
}

async fn listar_por_franquiciado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
) -> ApiResult {
    let filas = db.pagos_franquicia().listar_por_franquiciado(id).await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.pagos_franquicia().obtener(id).await? {
        Some(p) => Ok(errors::ok(p)),
        None => Err(ApiError::not_found("Pago de franquicia no encontrado")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevoPagoFranquicia>,
) -> ApiResult {
    validar(&body)?;
    let creado = db.pagos_franquicia().crear(&body).await?;
    Ok(errors::created(creado))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevoPagoFranquicia>,
) -> ApiResult {
    validar(&body)?;
    let actualizado = db.pagos_franquicia().actualizar(id, &body).await?;
    Ok(errors::ok(actualizado))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizado = db
        .pagos_franquicia()
        .cambiar_estado(id, &body.estado)
        .await?;
    Ok(errors::ok(actualizado))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.pagos_franquicia().eliminar(id).await?;
    Ok(errors::ok_message("Pago de franquicia eliminado"))
}

fn validar(body: &NuevoPagoFranquicia) -> Result<(), ApiError> {
    if !body.monto.is_finite() || body.monto <= 0.0 {
        return Err(ApiError::bad_request("El monto debe ser mayor a 0"));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
