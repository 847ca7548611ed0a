//! Application wiring: router tree and shared state.

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use tower::ServiceBuilder;

use infopan_db::Database;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full application router around a connected [`Database`].
pub fn build_app(db: Database) -> Router {
    let api = Router::new()
        .nest("/anunciantes", routes::anunciantes::router())
        .nest("/panaderias", routes::panaderias::router())
        .nest("/franquiciados", routes::franquiciados::router())
        .nest("/distribuciones", routes::distribuciones::router())
        .nest("/inventario", routes::inventario::router())
        .nest("/facturas", routes::facturas::router())
        .nest("/ordenes-produccion", routes::ordenes_produccion::router())
        .nest("/pagos-franquicia", routes::pagos_franquicia::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(Extension(db)))
}

async fn health(Extension(db): Extension<Database>) -> axum::response::Response {
    if db.health_check().await {
        (StatusCode::OK, Json(json!({"success": true, "data": {"status": "ok"}}))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"success": false, "message": "base de datos no disponible"})),
        )
            .into_response()
    }
}
