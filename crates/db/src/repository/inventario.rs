//! Stock items (inventario).
//!
//! The low-stock alert mirrors `infopan_inventory::es_stock_bajo` as a SQL
//! predicate so the listing stays a single indexed query.

use sqlx::PgPool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{ItemInventario, NuevoItemInventario};

#[derive(Debug, Clone)]
pub struct InventarioRepo {
    pool: PgPool,
}

impl InventarioRepo {
    pub fn new(pool: PgPool) -> Self {
        InventarioRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<ItemInventario>> {
        let filas = sqlx::query_as::<_, ItemInventario>(
            "SELECT * FROM inventario ORDER BY nombre_item",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<ItemInventario>> {
        let fila = sqlx::query_as::<_, ItemInventario>("SELECT * FROM inventario WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    pub async fn crear(&self, nuevo: &NuevoItemInventario) -> DbResult<ItemInventario> {
        debug!(nombre_item = %nuevo.nombre_item, "creando item de inventario");

        let fila = sqlx::query_as::<_, ItemInventario>(
            r#"
            INSERT INTO inventario
                (nombre_item, categoria, cantidad_actual, cantidad_minima, cantidad_maxima, unidad_medida)
            VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0), $6)
            RETURNING *
            "#,
        )
        .bind(&nuevo.nombre_item)
        .bind(&nuevo.categoria)
        .bind(nuevo.cantidad_actual)
        .bind(nuevo.cantidad_minima)
        .bind(nuevo.cantidad_maxima)
        .bind(&nuevo.unidad_medida)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(&self, id: i64, datos: &NuevoItemInventario) -> DbResult<ItemInventario> {
        let fila = sqlx::query_as::<_, ItemInventario>(
            r#"
            UPDATE inventario
            SET nombre_item = $2,
                categoria = $3,
                cantidad_actual = $4,
                cantidad_minima = COALESCE($5, cantidad_minima),
                cantidad_maxima = COALESCE($6, cantidad_maxima),
                unidad_medida = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&datos.nombre_item)
        .bind(&datos.categoria)
        .bind(datos.cantidad_actual)
        .bind(datos.cantidad_minima)
        .bind(datos.cantidad_maxima)
        .bind(&datos.unidad_medida)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("item de inventario", id))
    }

    /// Narrow quantity update (PATCH); sets the absolute stock level.
    pub async fn ajustar_cantidad(&self, id: i64, cantidad_actual: f64) -> DbResult<ItemInventario> {
        let fila = sqlx::query_as::<_, ItemInventario>(
            "UPDATE inventario SET cantidad_actual = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(cantidad_actual)
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("item de inventario", id))
    }

    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let res = sqlx::query("DELETE FROM inventario WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("item de inventario", id));
        }
        Ok(())
    }

    /// Items at or below their configured minimum threshold.
    pub async fn stock_bajo(&self) -> DbResult<Vec<ItemInventario>> {
        let filas = sqlx::query_as::<_, ItemInventario>(
            r#"
            SELECT * FROM inventario
            WHERE cantidad_minima > 0 AND cantidad_actual <= cantidad_minima
            ORDER BY cantidad_actual / cantidad_minima
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }
}
