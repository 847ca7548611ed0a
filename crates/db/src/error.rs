//! Database error model.
//!
//! Wraps `sqlx::Error` into a small taxonomy the HTTP layer can translate:
//! not-found, unique violation (SQLSTATE 23505), foreign-key violation
//! (SQLSTATE 23503), and everything else.

use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// Row lookup by id came back empty.
    #[error("{entity} {id} no existe")]
    NotFound { entity: &'static str, id: i64 },

    /// Unique constraint violation; carries the constraint name so the API
    /// can pick a human-readable message per business key.
    #[error("valor duplicado (restricción {constraint})")]
    UniqueViolation { constraint: String },

    /// Foreign-key violation, also used when deletion is blocked by
    /// dependent rows.
    #[error("{0}")]
    ForeignKeyViolation(String),

    #[error("conexión fallida: {0}")]
    Connection(String),

    #[error("migración fallida: {0}")]
    Migration(String),

    #[error("consulta fallida: {0}")]
    Query(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }

    pub fn dependientes(message: impl Into<String>) -> Self {
        DbError::ForeignKeyViolation(message.into())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DbError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("desconocida").to_string(),
                },
                Some("23503") => DbError::ForeignKeyViolation(
                    "La operación viola una referencia a otra entidad".to_string(),
                ),
                _ => DbError::Query(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => {
                DbError::Connection("pool de conexiones agotado".to_string())
            }
            sqlx::Error::PoolClosed => DbError::Connection("pool cerrado".to_string()),
            other => DbError::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}
