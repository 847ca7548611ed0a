//! Invoices (facturas) and their collections (cobros).
//!
//! Payment registration is the one multi-statement write in the system: the
//! invoice row is locked, the cobro inserted and the recomputed balance
//! written back inside a single transaction.

use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use infopan_core::DomainError;
use infopan_invoicing::{EstadoFactura, FacturaTotales, aplicar_cobro, estado_tras_edicion};

use crate::error::{DbError, DbResult};
use crate::models::{Cobro, ConteoPorEstado, Factura, NuevaFactura, NuevoCobro, ResumenFacturas};

/// Errors from the payment-registration transaction: business rules
/// (validation, annulled invoice) or storage failures.
#[derive(Debug, Error)]
pub enum CobroError {
    #[error(transparent)]
    Dominio(#[from] DomainError),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CobroError {
    fn from(err: sqlx::Error) -> Self {
        CobroError::Db(err.into())
    }
}

#[derive(Debug, Clone)]
pub struct FacturasRepo {
    pool: PgPool,
}

impl FacturasRepo {
    pub fn new(pool: PgPool) -> Self {
        FacturasRepo { pool }
    }

    pub async fn listar(&self) -> DbResult<Vec<Factura>> {
        let filas =
            sqlx::query_as::<_, Factura>("SELECT * FROM facturas ORDER BY fecha_emision DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(filas)
    }

    pub async fn listar_por_estado(&self, estado: &str) -> DbResult<Vec<Factura>> {
        let filas = sqlx::query_as::<_, Factura>(
            "SELECT * FROM facturas WHERE estado = $1 ORDER BY fecha_emision DESC",
        )
        .bind(estado)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: i64) -> DbResult<Option<Factura>> {
        let fila = sqlx::query_as::<_, Factura>("SELECT * FROM facturas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    /// Insert an invoice with its already-computed monetary fields.
    pub async fn crear(&self, nueva: &NuevaFactura, totales: &FacturaTotales) -> DbResult<Factura> {
        debug!(numero_factura = %nueva.numero_factura, total = totales.total, "creando factura");

        let fila = sqlx::query_as::<_, Factura>(
            r#"
            INSERT INTO facturas
                (numero_factura, anunciante_id, fecha_emision, fecha_vencimiento, concepto,
                 subtotal, porcentaje_iva, valor_iva, total, monto_pagado, saldo_pendiente, estado)
            VALUES ($1, $2, COALESCE($3, now()), $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&nueva.numero_factura)
        .bind(nueva.anunciante_id)
        .bind(nueva.fecha_emision)
        .bind(nueva.fecha_vencimiento)
        .bind(&nueva.concepto)
        .bind(totales.subtotal)
        .bind(totales.porcentaje_iva)
        .bind(totales.valor_iva)
        .bind(totales.total)
        .bind(totales.monto_pagado)
        .bind(totales.saldo_pendiente)
        .bind(totales.estado.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    /// Full update. `vencida` and `anulada` are set only by explicit action,
    /// so the current estado survives the edit; otherwise the recomputed
    /// payment-driven estado is written.
    pub async fn actualizar(
        &self,
        id: i64,
        nueva: &NuevaFactura,
        totales: &FacturaTotales,
    ) -> DbResult<Factura> {
        let mut tx = self.pool.begin().await?;

        let actual: String =
            sqlx::query_scalar("SELECT estado FROM facturas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::not_found("factura", id))?;
        let estado_actual = EstadoFactura::parse(&actual).unwrap_or(EstadoFactura::Emitida);
        let estado = estado_tras_edicion(estado_actual, totales.estado);

        let fila = sqlx::query_as::<_, Factura>(
            r#"
            UPDATE facturas
            SET numero_factura = $2,
                anunciante_id = $3,
                fecha_emision = COALESCE($4, fecha_emision),
                fecha_vencimiento = $5,
                concepto = $6,
                subtotal = $7,
                porcentaje_iva = $8,
                valor_iva = $9,
                total = $10,
                monto_pagado = $11,
                saldo_pendiente = $12,
                estado = $13,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&nueva.numero_factura)
        .bind(nueva.anunciante_id)
        .bind(nueva.fecha_emision)
        .bind(nueva.fecha_vencimiento)
        .bind(&nueva.concepto)
        .bind(totales.subtotal)
        .bind(totales.porcentaje_iva)
        .bind(totales.valor_iva)
        .bind(totales.total)
        .bind(totales.monto_pagado)
        .bind(totales.saldo_pendiente)
        .bind(estado.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(fila)
    }

    /// Narrow status update; the whitelist lives at the HTTP layer.
    pub async fn cambiar_estado(&self, id: i64, estado: EstadoFactura) -> DbResult<Factura> {
        let fila = sqlx::query_as::<_, Factura>(
            "UPDATE facturas SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado.as_str())
        .fetch_optional(&self.pool)
        .await?;
        fila.ok_or(DbError::not_found("factura", id))
    }

    /// Deletion is blocked while collections exist for the invoice.
    pub async fn eliminar(&self, id: i64) -> DbResult<()> {
        let cobros: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cobros WHERE factura_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if cobros > 0 {
            return Err(DbError::dependientes(
                "No se puede eliminar una factura con cobros registrados",
            ));
        }

        let res = sqlx::query("DELETE FROM facturas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(DbError::not_found("factura", id));
        }
        Ok(())
    }

    pub async fn cobros_de_factura(&self, factura_id: i64) -> DbResult<Vec<Cobro>> {
        let filas = sqlx::query_as::<_, Cobro>(
            "SELECT * FROM cobros WHERE factura_id = $1 ORDER BY fecha_cobro DESC",
        )
        .bind(factura_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    /// Register a payment against an invoice.
    ///
    /// Locks the invoice row, inserts the cobro and writes back the new
    /// balance and derived status atomically. Rolls back on any failure
    /// (including a duplicate `numero_recibo`).
    pub async fn registrar_cobro(
        &self,
        factura_id: i64,
        nuevo: &NuevoCobro,
    ) -> Result<(Factura, Cobro), CobroError> {
        let mut tx = self.pool.begin().await?;

        let factura =
            sqlx::query_as::<_, Factura>("SELECT * FROM facturas WHERE id = $1 FOR UPDATE")
                .bind(factura_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::not_found("factura", factura_id))?;

        let estado = EstadoFactura::parse(&factura.estado).unwrap_or(EstadoFactura::Emitida);
        let aplicacion = aplicar_cobro(factura.total, factura.monto_pagado, nuevo.monto, estado)?;

        let cobro = sqlx::query_as::<_, Cobro>(
            r#"
            INSERT INTO cobros (factura_id, numero_recibo, monto, fecha_cobro, metodo_pago, observaciones)
            VALUES ($1, $2, $3, COALESCE($4, now()), $5, $6)
            RETURNING *
            "#,
        )
        .bind(factura_id)
        .bind(&nuevo.numero_recibo)
        .bind(nuevo.monto)
        .bind(nuevo.fecha_cobro)
        .bind(&nuevo.metodo_pago)
        .bind(&nuevo.observaciones)
        .fetch_one(&mut *tx)
        .await?;

        let factura = sqlx::query_as::<_, Factura>(
            r#"
            UPDATE facturas
            SET monto_pagado = $2, saldo_pendiente = $3, estado = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(factura_id)
        .bind(aplicacion.monto_pagado)
        .bind(aplicacion.saldo_pendiente)
        .bind(aplicacion.estado.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            factura_id,
            monto = nuevo.monto,
            estado = %factura.estado,
            "cobro registrado"
        );
        Ok((factura, cobro))
    }

    /// Portfolio summary: global totals plus per-status counts.
    pub async fn resumen(&self) -> DbResult<(ResumenFacturas, Vec<ConteoPorEstado>)> {
        let totales = sqlx::query_as::<_, ResumenFacturas>(
            r#"
            SELECT COUNT(*) AS total_facturas,
                   COALESCE(SUM(total) FILTER (WHERE estado <> 'anulada'), 0) AS total_facturado,
                   COALESCE(SUM(monto_pagado) FILTER (WHERE estado <> 'anulada'), 0) AS total_cobrado,
                   COALESCE(SUM(saldo_pendiente) FILTER (WHERE estado <> 'anulada'), 0) AS cartera_pendiente
            FROM facturas
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let por_estado = sqlx::query_as::<_, ConteoPorEstado>(
            "SELECT estado, COUNT(*) AS cantidad FROM facturas GROUP BY estado ORDER BY estado",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok((totales, por_estado))
    }
}
