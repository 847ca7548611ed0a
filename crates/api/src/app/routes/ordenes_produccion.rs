use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};
use serde_json::json;

use infopan_db::Database;
use infopan_db::models::NuevaOrdenProduccion;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["pendiente", "en_proceso", "completada", "cancelada"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/stats/resumen", get(resumen))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.ordenes_produccion().listar().await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.ordenes_produccion().obtener(id).await? {
        Some(o) => Ok(errors::ok(o)),
        None => Err(ApiError::not_found("Orden de producción no encontrada")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevaOrdenProduccion>,
) -> ApiResult {
    validar(&body)?;
    let creada = db.ordenes_produccion().crear(&body).await?;
    Ok(errors::created(creada))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevaOrdenProduccion>,
) -> ApiResult {
    validar(&body)?;
    let actualizada = db.ordenes_produccion().actualizar(id, &body).await?;
    Ok(errors::ok(actualizada))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizada = db
        .ordenes_produccion()
        .cambiar_estado(id, &body.estado)
        .await?;
    Ok(errors::ok(actualizada))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.ordenes_produccion().eliminar(id).await?;
    Ok(errors::ok_message("Orden de producción eliminada"))
}

async fn resumen(Extension(db): Extension<Database>) -> ApiResult {
    let (totales, por_estado) = db.ordenes_produccion().resumen().await?;
    Ok(errors::ok(json!({"totales": totales, "por_estado": por_estado})))
}

fn validar(body: &NuevaOrdenProduccion) -> Result<(), ApiError> {
    if body.cantidad_solicitada <= 0 {
        return Err(ApiError::bad_request(
            "La cantidad solicitada debe ser mayor a 0",
        ));
    }
    if body.cantidad_producida.is_some_and(|c| c < 0)
        || body.cantidad_defectuosa.is_some_and(|c| c < 0)
    {
        return Err(ApiError::bad_request(
            "Las cantidades producida y defectuosa no pueden ser negativas",
        ));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
