use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};

use infopan_db::Database;
use infopan_db::models::NuevaPanaderia;

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};
use crate::app::routes::validar_estado;

const ESTADOS: &[&str] = &["activa", "inactiva"];

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.panaderias().listar().await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.panaderias().obtener(id).await? {
        Some(p) => Ok(errors::ok(p)),
        None => Err(ApiError::not_found("Panadería no encontrada")),
    }
}

async fn crear(Extension(db): Extension<Database>, Json(body): Json<NuevaPanaderia>) -> ApiResult {
    validar(&body)?;
    let creada = db.panaderias().crear(&body).await?;
    Ok(errors::created(creada))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevaPanaderia>,
) -> ApiResult {
    validar(&body)?;
    let actualizada = db.panaderias().actualizar(id, &body).await?;
    Ok(errors::ok(actualizada))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    validar_estado(&body.estado, ESTADOS)?;
    let actualizada = db.panaderias().cambiar_estado(id, &body.estado).await?;
    Ok(errors::ok(actualizada))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.panaderias().eliminar(id).await?;
    Ok(errors::ok_message("Panadería eliminada"))
}

fn validar(body: &NuevaPanaderia) -> Result<(), ApiError> {
    if body.nombre.trim().is_empty() {
        return Err(ApiError::bad_request("El nombre es obligatorio"));
    }
    if body.direccion.trim().is_empty() {
        return Err(ApiError::bad_request("La dirección es obligatoria"));
    }
    if let Some(estado) = &body.estado {
        validar_estado(estado, ESTADOS)?;
    }
    Ok(())
}
