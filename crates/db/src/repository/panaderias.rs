//! Partner bakeries (panaderías).

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{NuevaPanaderia, Panaderia};

#[derive(Debug, Clone)]
pub struct PanaderiasRepo {
    pool: PgPool,
}

impl PanaderiasRepo {
    pub fn new(pool: PgPool) -> Self {
        PanaderiasRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<Panaderia>> {
        let filas =
            sqlx::query_as::<_, Panaderia>("SELECT * FROM panaderias ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<Panaderia>> {
        let fila = sqlx::query_as::<_, Panaderia>("SELECT * FROM panaderias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nueva: &NuevaPanaderia) -> DbResult<Panaderia> {
        debug!(nombre = %nueva.nombre, "creando panadería");

        let fila = sqlx::query_as::<_, Panaderia>(
            r#"
            INSERT INTO panaderias (nombre, direccion, sector, contacto, telefono, estado)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'activa'))
            RETURNING *
            "#,
        )
        .bind(&nueva.nombre)
        .bind(&nueva.direccion)
        .bind(&nueva.sector)
        .bind(&nueva.contacto)
        .bind(&nueva.telefono)
        .bind(&nueva.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(&self, id: i64, datos: &NuevaPanaderia) -> DbResult<Panaderia> {
        let fila = sqlx::query_as::<_, Panaderia>(
            r#"
            UPDATE panaderias
            SET nombre = $2,
                direccion = $3,
                sector = $4,
                contacto = $5,
                telefono = $6,
                estado = COALESCE($7, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&datos.nombre)
        .bind(&datos.direccion)
        .bind(&datos.sector)
        .bind(&datos.contacto)
        .bind(&datos.telefono)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("panadería", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<Panaderia> {
        let fila = sqlx::query_as::<_, Panaderia>(
            "UPDATE panaderias SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("panadería", id))
    }

    /// Deletion is blocked while the bakery still has logged distributions.
    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let dependientes: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM distribuciones WHERE panaderia_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if dependientes > 0 {
            return Err(DbError::dependientes(
                "No se puede eliminar una panadería con distribuciones registradas",
            ));
        }

        let res = sqlx::query("DELETE FROM panaderias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("panadería", id));
        }
        Ok(())
    }
}
