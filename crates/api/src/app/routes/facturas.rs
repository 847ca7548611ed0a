//! Invoice endpoints: CRUD, status changes, per-invoice collections and the
//! portfolio summary.

use axum::{
    Json, Router,
    extract::{Extension, Path},
    routing::{get, patch},
};
use serde_json::json;

use infopan_db::Database;
use infopan_db::models::{NuevaFactura, NuevoCobro};
use infopan_invoicing::{EstadoFactura, FacturaTotales};

use crate::app::dto::CambiarEstadoRequest;
use crate::app::errors::{self, ApiError, ApiResult};

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar).post(crear))
        .route("/stats/resumen", get(resumen))
        .route("/estado/:estado", get(listar_por_estado))
        .route("/:id", get(obtener).put(actualizar).delete(eliminar))
        .route("/:id/estado", patch(cambiar_estado))
        .route("/:id/cobros", get(listar_cobros).post(registrar_cobro))
}

async fn listar(Extension(db): Extension<Database>) -> ApiResult {
    let filas = db.facturas().listar().await?;
    Ok(errors::ok(filas))
}

async fn listar_por_estado(
    Extension(db): Extension<Database>,
    Path(estado): Path<String>,
) -> ApiResult {
    let estado = parsear_estado(&estado)?;
    let filas = db.facturas().listar_por_estado(estado.as_str()).await?;
    Ok(errors::ok(filas))
}

async fn obtener(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    match db.facturas().obtener(id).await? {
        Some(f) => Ok(errors::ok(f)),
        None => Err(ApiError::not_found("Factura no encontrada")),
    }
}

async fn crear(Extension(db): Extension<Database>, Json(body): Json<NuevaFactura>) -> ApiResult {
    let totales = validar(&body)?;
    let creada = db.facturas().crear(&body, &totales).await?;
    Ok(errors::created(creada))
}

async fn actualizar(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevaFactura>,
) -> ApiResult {
    let totales = validar(&body)?;
    let actualizada = db.facturas().actualizar(id, &body, &totales).await?;
    Ok(errors::ok(actualizada))
}

async fn cambiar_estado(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<CambiarEstadoRequest>,
) -> ApiResult {
    let estado = parsear_estado(&body.estado)?;
    let actualizada = db.facturas().cambiar_estado(id, estado).await?;
    Ok(errors::ok(actualizada))
}

async fn eliminar(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    db.facturas().eliminar(id).await?;
    Ok(errors::ok_message("Factura eliminada"))
}

async fn listar_cobros(Extension(db): Extension<Database>, Path(id): Path<i64>) -> ApiResult {
    // Una factura inexistente responde 404, no una lista vacía.
    if db.facturas().obtener(id).await?.is_none() {
        return Err(ApiError::not_found("Factura no encontrada"));
    }
    let cobros = db.facturas().cobros_de_factura(id).await?;
    Ok(errors::ok(cobros))
}

async fn registrar_cobro(
    Extension(db): Extension<Database>,
    Path(id): Path<i64>,
    Json(body): Json<NuevoCobro>,
) -> ApiResult {
    let (factura, cobro) = db.facturas().registrar_cobro(id, &body).await?;
    Ok(errors::created(json!({"factura": factura, "cobro": cobro})))
}

async fn resumen(Extension(db): Extension<Database>) -> ApiResult {
    let (totales, por_estado) = db.facturas().resumen().await?;
    Ok(errors::ok(json!({"totales": totales, "por_estado": por_estado})))
}

/// Derive the monetary fields; rejects a blank invoice number first.
fn validar(body: &NuevaFactura) -> Result<FacturaTotales, ApiError> {
    if body.numero_factura.trim().is_empty() {
        return Err(ApiError::bad_request("El número de factura es obligatorio"));
    }
    let totales = FacturaTotales::calcular(
        body.subtotal,
        body.porcentaje_iva,
        body.valor_iva,
        body.total,
        body.monto_pagado,
        body.saldo_pendiente,
    )?;
    Ok(totales)
}

fn parsear_estado(estado: &str) -> Result<EstadoFactura, ApiError> {
    EstadoFactura::parse(estado).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Estado inválido: {estado}. Valores permitidos: emitida, pagada_parcial, pagada, vencida, anulada"
        ))
    })
}
