//! Distribution events (deliveries of printed bags to bakeries).

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{Distribucion, NuevaDistribucion, ResumenDistribucionesFila};

#[derive(Debug, Clone)]
pub struct DistribucionesRepo {
    pool: PgPool,
}

impl DistribucionesRepo {
    pub fn new(pool: PgPool) -> Self {
        DistribucionesRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<Distribucion>> {
        let filas = sqlx::query_as::<_, Distribucion>(
            "SELECT * FROM distribuciones ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_por_panaderia(&self, panaderia_id: i64) -> DbResult<Vec<Distribucion>> {
        let filas = sqlx::query_as::<_, Distribucion>(
            "SELECT * FROM distribuciones WHERE panaderia_id = $1 ORDER BY created_at DESC",
        )
        .bind(panaderia_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<Distribucion>> {
        let fila = sqlx::query_as::<_, Distribucion>("SELECT * FROM distribuciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nueva: &NuevaDistribucion) -> DbResult<Distribucion> {
        debug!(
            panaderia_id = nueva.panaderia_id,
            cantidad_fundas = nueva.cantidad_fundas,
            "creando distribución"
        );

        let fila = sqlx::query_as::<_, Distribucion>(
            r#"
            INSERT INTO distribuciones
                (panaderia_id, franquiciado_id, fecha_entrega, cantidad_fundas,
                 latitud, longitud, foto_url, observaciones, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'programada'))
            RETURNING *
            "#,
        )
        .bind(nueva.panaderia_id)
        .bind(nueva.franquiciado_id)
        .bind(nueva.fecha_entrega)
        .bind(nueva.cantidad_fundas)
        .bind(nueva.latitud)
        .bind(nueva.longitud)
        .bind(&nueva.foto_url)
        .bind(&nueva.observaciones)
        .bind(&nueva.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(&self, id: i64, datos: &NuevaDistribucion) -> DbResult<Distribucion> {
        let fila = sqlx::query_as::<_, Distribucion>(
            r#"
            UPDATE distribuciones
            SET panaderia_id = $2,
                franquiciado_id = $3,
                fecha_entrega = $4,
                cantidad_fundas = $5,
                latitud = $6,
                longitud = $7,
                foto_url = $8,
                observaciones = $9,
                estado = COALESCE($10, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(datos.panaderia_id)
        .bind(datos.franquiciado_id)
        .bind(datos.fecha_entrega)
        .bind(datos.cantidad_fundas)
        .bind(datos.latitud)
        .bind(datos.longitud)
        .bind(&datos.foto_url)
        .bind(&datos.observaciones)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("distribución", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<Distribucion> {
        let fila = sqlx::query_as::<_, Distribucion>(
            "UPDATE distribuciones SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("distribución", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM distribuciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("distribución", id));
        }
        Ok(())
    }

    /// Per-status counts and delivered-bag totals.
    pub async fn resumen(&self) -> DbResult<Vec<ResumenDistribucionesFila>> {
        let filas = sqlx::query_as::<_, ResumenDistribucionesFila>(
            r#"
            SELECT estado,
                   COUNT(*) AS cantidad,
                   COALESCE(SUM(cantidad_fundas), 0)::BIGINT AS total_fundas
            FROM distribuciones
            GROUP BY estado
            ORDER BY estado
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }
}
