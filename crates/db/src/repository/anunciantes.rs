//! Advertisers (anunciantes).

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{Anunciante, ConteoPorEstado, NuevoAnunciante};

#[derive(Debug, Clone)]
pub struct AnunciantesRepo {
    pool: PgPool,
}

impl AnunciantesRepo {
    pub fn new(pool: PgPool) -> Self {
        AnunciantesRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<Anunciante>> {
        let filas = sqlx::query_as::<_, Anunciante>(
            "SELECT * FROM anunciantes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<Anunciante>> {
        let fila = sqlx::query_as::<_, Anunciante>("SELECT * FROM anunciantes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nuevo: &NuevoAnunciante) -> DbResult<Anunciante> {
        debug!(nombre_empresa = %nuevo.nombre_empresa, "creando anunciante");

        let fila = sqlx::query_as::<_, Anunciante>(
            r#"
            INSERT INTO anunciantes (nombre_empresa, ruc, contacto, telefono, email, direccion, estado)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'activo'))
            RETURNING *
            "#,
        )
        .bind(&nuevo.nombre_empresa)
        .bind(&nuevo.ruc)
        .bind(&nuevo.contacto)
        .bind(&nuevo.telefono)
        .bind(&nuevo.email)
        .bind(&nuevo.direccion)
        .bind(&nuevo.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(&self, id: i64, datos: &NuevoAnunciante) -> DbResult<Anunciante> {
        let fila = sqlx::query_as::<_, Anunciante>(
            r#"
            UPDATE anunciantes
            SET nombre_empresa = $2,
                ruc = $3,
                contacto = $4,
                telefono = $5,
                email = $6,
                direccion = $7,
                estado = COALESCE($8, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&datos.nombre_empresa)
        .bind(&datos.ruc)
        .bind(&datos.contacto)
        .bind(&datos.telefono)
        .bind(&datos.email)
        .bind(&datos.direccion)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("anunciante", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<Anunciante> {
        let fila = sqlx::query_as::<_, Anunciante>(
            "UPDATE anunciantes SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("anunciante", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM anunciantes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("anunciante", id));
        }
        Ok(())
    }

    /// Active/inactive counts for the dashboard.
    pub async fn resumen(&self) -> DbResult<Vec<ConteoPorEstado>> {
        let filas = sqlx::query_as::<_, ConteoPorEstado>(
            "SELECT estado, COUNT(*) AS cantidad FROM anunciantes GROUP BY estado ORDER BY estado",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }
}
