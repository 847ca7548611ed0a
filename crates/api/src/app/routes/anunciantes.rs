use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};

use infopan_db::Database;
use infopan_db::models::NuevoAnunciante;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["activo", "inactivo"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/stats/resumen", get(resumen))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.anunciantes().listar().await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.anunciantes().obtener(id).await? {
        Some(a) => Ok(errors::ok(a)),
        None => Err(ApiError::not_found("Anunciante no encontrado")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevoAnunciante>,
) -> ApiResult {
    validar(&body)?;
    let creado = db.anunciantes().crear(&body).await?;
    Ok(errors::created(creado))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevoAnunciante>,
) -> ApiResult {
    validar(&body)?;
    let actualizado = db.anunciantes().actualizar(id, &body).await?;
    Ok(errors::ok(actualizado))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizado = db.anunciantes().cambiar_estado(id, &body.estado).await?;
    Ok(errors::ok(actualizado))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.anunciantes().eliminar(id).await?;
    Ok(errors::ok_message("Anunciante eliminado"))
}

async fn resumen(Extension(db): Extension<Database>) -> ApiResult {
    let por_estado = db.anunciantes().resumen().await?;
    Ok(errors::ok(por_estado))
}

fn validar(body: &NuevoAnunciante) -> Result<(), ApiError> {
    if body.nombre_empresa.trim().is_empty() {
        return Err(ApiError::bad_request("El nombre de la empresa es obligatorio"));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
