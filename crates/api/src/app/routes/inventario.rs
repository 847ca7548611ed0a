//! Stock endpoints. Responses decorate each item with its computed `nivel`
//! so clients don't re-implement the threshold rules.

use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};
use serde_json::{Value, json};

use infopan_db::Database;
use infopan_db::models::{ItemInventario, NuevoItemInventario};
use infopan_inventory::clasificar_stock;

use crate::app::dto::AjustarCantidadRequest;
use crate::app::errors::{self, ApiError, ApiResult};

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/alertas/stock-bajo", get(stock_bajo))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/cantidad", patch(ajustar_cantidad))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.inventario().listar().await?;
    Ok(errors::ok(con_niveles(filas)))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.inventario().obtener(id).await? {
        Some(item) => Ok(errors::ok(con_nivel(&item))),
        None => Err(ApiError::not_found("Item de inventario no encontrado")),
    }
}

async fn crear(
    Extension(db): Extension<Database>,
    Json(body): Json<NuevoItemInventario>,
) -> ApiResult {
    validar(&body)?;
    let creado = db.inventario().crear(&body).await?;
    Ok(errors::created(con_nivel(&creado)))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevoItemInventario>,
) -> ApiResult {
    validar(&body)?;
    let actualizado = db.inventario().actualizar(id, &body).await?;
    Ok(errors::ok(con_nivel(&actualizado)))
}

async fn ajustar_cantidad(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<AjustarCantidadRequest>,
) -> ApiResult {
    if !body.cantidad_actual.is_finite() || body.cantidad_actual < 0.0 {
        return Err(ApiError::bad_request(
            "La cantidad actual no puede ser negativa",
        ));
    }
    let actualizado = db.inventario().ajustar_cantidad(id, body.cantidad_actual).await?;
    Ok(errors::ok(con_nivel(&actualizado)))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.inventario().eliminar(id).await?;
    Ok(errors::ok_message("Item de inventario eliminado"))
}

async fn stock_bajo(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.inventario().stock_bajo().await?;
    Ok(errors::ok(con_niveles(filas)))
}

fn validar(body: &NuevoItemInventario) -> Result<(), ApiError> {
    if body.nombre_item.trim().is_empty() {
        return Err(ApiError::bad_request("El nombre del item es obligatorio"));
    }
    if !body.cantidad_actual.is_finite() || body.cantidad_actual < 0.0 {
        return Err(ApiError::bad_request(
            "La cantidad actual no puede ser negativa",
        ));
    }
    Ok(())
}

fn con_nivel(item: &ItemInventario) -> Value {
    let nivel = clasificar_stock(
        item.cantidad_actual,
        item.cantidad_minima,
        item.cantidad_maxima,
    );
    let mut v = json!(item);
    v["nivel"] = json!(nivel.as_str());
    v
}

fn con_niveles(items: Vec<ItemInventario>) -> Vec<Value> {
    items.iter().map(con_nivel).collect()
}
