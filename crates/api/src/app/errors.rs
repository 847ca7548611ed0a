//! Uniform response envelope and error → HTTP status mapping.
//!
//! Every endpoint answers `{success, data}` on the happy path and
//! `{success: false, message}` on failure; unexpected failures additionally
//! carry the driver message under `error`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use infopan_core::DomainError;
use infopan_db::DbError;
use infopan_db::repository::CobroError;

/// Handler result: a ready envelope response or a mapped error.
pub type ApiResult = Result<Response, ApiError>;

/// `200 OK` with `{success: true, data}`.
pub fn ok(data: impl Serialize) -> Response {
    (StatusCode::OK, Json(json!({"success": true, "data": data}))).into_response()
}

/// `201 Created` with `{success: true, data}`.
pub fn created(data: impl Serialize) -> Response {
    (StatusCode::CREATED, Json(json!({"success": true, "data": data}))).into_response()
}

/// `200 OK` with `{success: true, message}` (deletes and other ack-only ops).
pub fn ok_message(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": message.into()})),
    )
        .into_response()
}

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };

        let body = if status.is_server_error() {
            json!({"success": false, "message": "Error interno del servidor", "error": message})
        } else {
            json!({"success": false, "message": message})
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::UniqueViolation { constraint } => {
                ApiError::BadRequest(mensaje_duplicado(&constraint))
            }
            DbError::ForeignKeyViolation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(m) | DomainError::InvariantViolation(m) => {
                ApiError::BadRequest(m)
            }
            DomainError::NotFound => ApiError::NotFound("no encontrado".to_string()),
        }
    }
}

impl From<CobroError> for ApiError {
    fn from(err: CobroError) -> Self {
        match err {
            CobroError::Dominio(e) => e.into(),
            CobroError::Db(e) => e.into(),
        }
    }
}

/// Human-readable message per unique business key.
fn mensaje_duplicado(constraint: &str) -> String {
    match constraint {
        "facturas_numero_factura_key" => "Ya existe una factura con este número".to_string(),
        "cobros_numero_recibo_key" => "Ya existe un cobro con este número de recibo".to_string(),
        "anunciantes_ruc_key" => "Ya existe un anunciante con este RUC".to_string(),
        "franquiciados_ruc_key" => "Ya existe un franquiciado con este RUC".to_string(),
        otro => format!("Valor duplicado (restricción {otro})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numero_de_factura_duplicado_tiene_mensaje_propio() {
        let err: ApiError = DbError::UniqueViolation {
            constraint: "facturas_numero_factura_key".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ApiError::BadRequest("Ya existe una factura con este número".to_string())
        );
    }

    #[test]
    fn errores_de_dominio_son_400() {
        let err: ApiError = DomainError::validation("El subtotal debe ser mayor a 0").into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = DomainError::invariant("factura anulada").into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn not_found_de_db_es_404() {
        let err: ApiError = DbError::not_found("factura", 7).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn fallas_de_consulta_son_500() {
        let err: ApiError = DbError::Query("syntax error".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn codigos_de_estado() {
        assert_eq!(
            ApiError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
