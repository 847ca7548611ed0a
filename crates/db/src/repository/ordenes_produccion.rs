//! Production orders (órdenes de producción de fundas).

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{ConteoPorEstado, NuevaOrdenProduccion, OrdenProduccion, ResumenProduccion};

#[derive(Debug, Clone)]
pub struct OrdenesProduccionRepo {
    pool: PgPool,
}

impl OrdenesProduccionRepo {
    pub fn new(pool: PgPool) -> Self {
        OrdenesProduccionRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<OrdenProduccion>> {
        let filas = sqlx::query_as::<_, OrdenProduccion>(
            "SELECT * FROM ordenes_produccion ORDER BY fecha_solicitud DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<OrdenProduccion>> {
        let fila =
            sqlx::query_as::<_, OrdenProduccion>("SELECT * FROM ordenes_produccion WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nueva: &NuevaOrdenProduccion) -> DbResult<OrdenProduccion> {
        debug!(cantidad_solicitada = nueva.cantidad_solicitada, "creando orden de producción");

        let fila = sqlx::query_as::<_, OrdenProduccion>(
            r#"
            INSERT INTO ordenes_produccion
                (fecha_solicitud, cantidad_solicitada, cantidad_producida,
                 cantidad_defectuosa, franquiciado_id, notas, estado)
            VALUES (COALESCE($1, now()), $2, COALESCE($3, 0), COALESCE($4, 0), $5, $6,
                    COALESCE($7, 'pendiente'))
            RETURNING *
            "#,
        )
        .bind(nueva.fecha_solicitud)
        .bind(nueva.cantidad_solicitada)
        .bind(nueva.cantidad_producida)
        .bind(nueva.cantidad_defectuosa)
        .bind(nueva.franquiciado_id)
        .bind(&nueva.notas)
        .bind(&nueva.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        datos: &NuevaOrdenProduccion,
    ) -> DbResult<OrdenProduccion> {
        let fila = sqlx::query_as::<_, OrdenProduccion>(
            r#"
            UPDATE ordenes_produccion
            SET fecha_solicitud = COALESCE($2, fecha_solicitud),
                cantidad_solicitada = $3,
                cantidad_producida = COALESCE($4, cantidad_producida),
                cantidad_defectuosa = COALESCE($5, cantidad_defectuosa),
                franquiciado_id = $6,
                notas = $7,
                estado = COALESCE($8, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(datos.fecha_solicitud)
        .bind(datos.cantidad_solicitada)
        .bind(datos.cantidad_producida)
        .bind(datos.cantidad_defectuosa)
        .bind(datos.franquiciado_id)
        .bind(&datos.notas)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("orden de producción", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<OrdenProduccion> {
        let fila = sqlx::query_as::<_, OrdenProduccion>(
            "UPDATE ordenes_produccion SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("orden de producción", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM ordenes_produccion WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("orden de producción", id));
        }
        Ok(())
    }

    pub async fn resumen(&self) -> DbResult<(ResumenProduccion, Vec<ConteoPorEstado>)> {
        let totales = sqlx::query_as::<_, ResumenProduccion>(
            r#"
            SELECT COUNT(*) AS total_ordenes,
                   COALESCE(SUM(cantidad_solicitada), 0)::BIGINT AS total_solicitada,
                   COALESCE(SUM(cantidad_producida), 0)::BIGINT AS total_producida,
                   COALESCE(SUM(cantidad_defectuosa), 0)::BIGINT AS total_defectuosa
            FROM ordenes_produccion
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let por_estado = sqlx::query_as::<_, ConteoPorEstado>(
            "SELECT estado, COUNT(*) AS cantidad FROM ordenes_produccion GROUP BY estado ORDER BY estado",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((totales, por_estado))
    }
}
