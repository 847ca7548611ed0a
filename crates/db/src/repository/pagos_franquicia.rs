//! Royalty payments from franchisees to the franchisor.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{NuevoPagoFranquicia, PagoFranquicia};

#[derive(Debug, Clone)]
pub struct PagosFranquiciaRepo {
    pool: PgPool,
}

impl PagosFranquiciaRepo {
    pub fn new(pool: PgPool) -> Self {
        PagosFranquiciaRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<PagoFranquicia>> {
        let filas = sqlx::query_as::<_, PagoFranquicia>(
            "SELECT * FROM pagos_franquicia ORDER BY fecha_pago DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_por_franquiciado(
        &self,
        franquiciado_id: i64,
    ) -> DbResult<Vec<PagoFranquicia>> {
        let filas = sqlx::query_as::<_, PagoFranquicia>(
            "SELECT * FROM pagos_franquicia WHERE franquiciado_id = $1 ORDER BY fecha_pago DESC",
        )
        .bind(franquiciado_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<PagoFranquicia>> {
        let fila =
            sqlx::query_as::<_, PagoFranquicia>("SELECT * FROM pagos_franquicia WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nuevo: &NuevoPagoFranquicia) -> DbResult<PagoFranquicia> {
        debug!(franquiciado_id = nuevo.franquiciado_id, monto = nuevo.monto, "creando pago de franquicia");

        let fila = sqlx::query_as::<_, PagoFranquicia>(
            r#"
            INSERT INTO pagos_franquicia
                (franquiciado_id, monto, fecha_pago, periodo, metodo_pago, estado)
            VALUES ($1, $2, COALESCE($3, now()), $4, $5, COALESCE($6, 'pendiente'))
            RETURNING *
            "#,
        )
        .bind(nuevo.franquiciado_id)
        .bind(nuevo.monto)
        .bind(nuevo.fecha_pago)
        .bind(&nuevo.periodo)
        .bind(&nuevo.metodo_pago)
        .bind(&nuevo.estado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        datos: &NuevoPagoFranquicia,
    ) -> DbResult<PagoFranquicia> {
        let fila = sqlx::query_as::<_, PagoFranquicia>(
            r#"
            UPDATE pagos_franquicia
            SET franquiciado_id = $2,
                monto = $3,
                fecha_pago = COALESCE($4, fecha_pago),
                periodo = $5,
                metodo_pago = $6,
                estado = COALESCE($7, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(datos.franquiciado_id)
        .bind(datos.monto)
        .bind(datos.fecha_pago)
        .bind(&datos.periodo)
        .bind(&datos.metodo_pago)
        .bind(&datos.estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("pago de franquicia", id))
    }

    pub async fn cambiar_estado(&self, id: i64, estado: &str) -> DbResult<PagoFranquicia> {
        let fila = sqlx::query_as::<_, PagoFranquicia>(
            "UPDATE pagos_franquicia SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("pago de franquicia", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM pagos_franquicia WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("pago de franquicia", id));
        }
        Ok(())
    }
}
