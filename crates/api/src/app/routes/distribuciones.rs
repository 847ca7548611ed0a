use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};

use infopan_db::Database;
use infopan_db::models::NuevaDistribucion;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["programada", "en_ruta", "entregada", "cancelada"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/stats/resumen", get(resumen))
        .route("/panaderia/:id", get(listar_por_panaderia))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.distribuciones().listar().await?;
    Ok(errors::ok(filas))
}

async fn listar_por_panaderia(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
) -> ApiResult {
    let filas = db.distribuciones().listar_por_panaderia(id).await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.distribuciones().obtener(id).await? {
        Some(d) => Ok(errors::ok(d)),
        None => Err(ApiError::not_found("Distribución no encontrada")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevaDistribucion>,
) -> ApiResult {
    validar(&body)?;
    let creada = db.distribuciones().crear(&body).await?;
    Ok(errors::created(creada))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevaDistribucion>,
) -> ApiResult {
    validar(&body)?;
    let actualizada = db.distribuciones().actualizar(id, &body).await?;
    Ok(errors::ok(actualizada))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizada = db.distribuciones().cambiar_estado(id, &body.estado).await?;
    Ok(errors::ok(actualizada))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.distribuciones().eliminar(id).await?;
    Ok(errors::ok_message("Distribución eliminada"))
}

async fn resumen(Extension(db): Extension<Database>) -> ApiResult {
    let por_estado = db.distribuciones().resumen().await?;
    Ok(errors::ok(por_estado))
}

fn validar(body: &NuevaDistribucion) -> Result<(), ApiError> {
    if body.cantidad_fundas <= 0 {
        return Err(ApiError::bad_request("La cantidad de fundas debe ser mayor a 0"));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
