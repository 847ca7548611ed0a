//! Franchisees (franquiciados).

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{Franquiciado, NuevoFranquiciado};

#[derive(Debug, Clone)]
pub struct FranquiciadosRepo {
    pool: PgPool,
}

impl FranquiciadosRepo {
    pub fn new(pool: PgPool) -> Self {
        FranquiciadosRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<Franquiciado>> {
        let filas = sqlx::query_as::<_, Franquiciado>(
            "SELECT * FROM franquiciados ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<Franquiciado>> {
        let fila = sqlx::query_as::<_, Franquiciado>("SELECT * FROM franquiciados WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nuevo: &NuevoFranquiciado) -> DbResult<Franquiciado> {
        debug!(nombre = %nuevo.nombre, "creando franquiciado");

        let fila = sqlx::query_as::<_, Franquiciado>(
            r#"
            INSERT INTO franquiciados (nombre, ruc, email, telefono, zona, estado)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'activo'))
            RETURNING *
            "#,
        )
        .bind(&nuevo.nombre)
        .bind(&nuevo.ruc)
        .bind(&nuevo.email)
        .bind(&nuevo.telefono)
        .bind(&nuevo.zona)
        .bind(&nuevo.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(&self, id: i64, datos: &NuevoFranquiciado) -> DbResult<Franquiciado> {
        let fila = sqlx::query_as::<_, Franquiciado>(
            r#"
            UPDATE franquiciados
            SET nombre = $2,
                ruc = $3,
                email = $4,
                telefono = $5,
                zona = $6,
                estado = COALESCE($7, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&datos.nombre)
        .bind(&datos.ruc)
        .bind(&datos.email)
        .bind(&datos.telefono)
        .bind(&datos.zona)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("franquiciado", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<Franquiciado> {
        let fila = sqlx::query_as::<_, Franquiciado>(
            "UPDATE franquiciados SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("franquiciado", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM franquiciados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("franquiciado", id));
        }
        Ok(())
    }
}
