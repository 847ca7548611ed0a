use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};

use infopan_db::Database;
use infopan_db::models::NuevoFranquiciado;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["activo", "suspendido", "inactivo"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.franquiciados().listar().await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.franquiciados().obtener(id).await? {
        Some(f) => Ok(errors::ok(f)),
        None => Err(ApiError::not_found("Franquiciado no encontrado")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevoFranquiciado>,
) -> ApiResult {
    validar(&body)?;
    let creado = db.franquiciados().crear(&body).await?;
    Ok(errors::created(creado))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevoFranquiciado>,
) -> ApiResult {
    validar(&body)?;
    let actualizado = db.franquiciados().actualizar(id, &body).await?;
    Ok(errors::ok(actualizado))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizado = db.franquiciados().cambiar_estado(id, &body.estado).await?;
    Ok(errors::ok(actualizado))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.franquiciados().eliminar(id).await?;
    Ok(errors::ok_message("Franquiciado eliminado"))
}

fn validar(body: &NuevoFranquiciado) -> Result<(), ApiError> {
    if body.nombre.trim().is_empty() {
        return Err(ApiError::bad_request("El nombre es obligatorio"));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
