//! Row and input models for every business entity.
//!
//! Row structs derive `FromRow` + `Serialize` and map 1:1 to table columns.
//! `Nuevo*` structs are the deserialized request payloads for create/update;
//! the HTTP layer hands them to the repositories unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// -------------------------
// Anunciantes (advertisers)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Anunciante {
    pub id: i64,
    pub nombre_empresa: String,
    pub ruc: Option<String>,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub direccion: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoAnunciante {
    pub nombre_empresa: String,
    pub ruc: Option<String>,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub direccion: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Panaderías (bakeries)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panaderia {
    pub id: i64,
    pub nombre: String,
    pub direccion: String,
    pub sector: Option<String>,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaPanaderia {
    pub nombre: String,
    pub direccion: String,
    pub sector: Option<String>,
    pub contacto: Option<String>,
    pub telefono: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Franquiciados (franchisees)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Franquiciado {
    pub id: i64,
    pub nombre: String,
    pub ruc: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub zona: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoFranquiciado {
    pub nombre: String,
    pub ruc: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub zona: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Distribuciones (delivery events)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Distribucion {
    pub id: i64,
    pub panaderia_id: i64,
    pub franquiciado_id: Option<i64>,
    pub fecha_entrega: Option<DateTime<Utc>>,
    pub cantidad_fundas: i64,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub foto_url: Option<String>,
    pub observaciones: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaDistribucion {
    pub panaderia_id: i64,
    pub franquiciado_id: Option<i64>,
    pub fecha_entrega: Option<DateTime<Utc>>,
    pub cantidad_fundas: i64,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub foto_url: Option<String>,
    pub observaciones: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Inventario (stock items)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemInventario {
    pub id: i64,
    pub nombre_item: String,
    pub categoria: Option<String>,
    pub cantidad_actual: f64,
    pub cantidad_minima: f64,
    pub cantidad_maxima: f64,
    pub unidad_medida: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoItemInventario {
    pub nombre_item: String,
    pub categoria: Option<String>,
    pub cantidad_actual: f64,
    pub cantidad_minima: Option<f64>,
    pub cantidad_maxima: Option<f64>,
    pub unidad_medida: Option<String>,
}

// -------------------------
// Facturas (invoices) y cobros (collections)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Factura {
    pub id: i64,
    pub numero_factura: String,
    pub anunciante_id: i64,
    pub fecha_emision: DateTime<Utc>,
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    pub concepto: Option<String>,
    pub subtotal: f64,
    pub porcentaje_iva: f64,
    pub valor_iva: f64,
    pub total: f64,
    pub monto_pagado: f64,
    pub saldo_pendiente: f64,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaFactura {
    pub numero_factura: String,
    pub anunciante_id: i64,
    pub fecha_emision: Option<DateTime<Utc>>,
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    pub concepto: Option<String>,
    pub subtotal: f64,
    pub porcentaje_iva: Option<f64>,
    pub valor_iva: Option<f64>,
    pub total: Option<f64>,
    pub monto_pagado: Option<f64>,
    pub saldo_pendiente: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cobro {
    pub id: i64,
    pub factura_id: i64,
    pub numero_recibo: Option<String>,
    pub monto: f64,
    pub fecha_cobro: DateTime<Utc>,
    pub metodo_pago: Option<String>,
    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoCobro {
    pub numero_recibo: Option<String>,
    pub monto: f64,
    pub fecha_cobro: Option<DateTime<Utc>>,
    pub metodo_pago: Option<String>,
    pub observaciones: Option<String>,
}

// -------------------------
// Órdenes de producción (production orders)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrdenProduccion {
    pub id: i64,
    pub fecha_solicitud: DateTime<Utc>,
    pub cantidad_solicitada: i64,
    pub cantidad_producida: i64,
    pub cantidad_defectuosa: i64,
    pub franquiciado_id: Option<i64>,
    pub notas: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevaOrdenProduccion {
    pub fecha_solicitud: Option<DateTime<Utc>>,
    pub cantidad_solicitada: i64,
    pub cantidad_producida: Option<i64>,
    pub cantidad_defectuosa: Option<i64>,
    pub franquiciado_id: Option<i64>,
    pub notas: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Pagos a la franquicia (payments to franchisor)
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PagoFranquicia {
    pub id: i64,
    pub franquiciado_id: i64,
    pub monto: f64,
    pub fecha_pago: DateTime<Utc>,
    pub periodo: Option<String>,
    pub metodo_pago: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NuevoPagoFranquicia {
    pub franquiciado_id: i64,
    pub monto: f64,
    pub fecha_pago: Option<DateTime<Utc>>,
    pub periodo: Option<String>,
    pub metodo_pago: Option<String>,
    pub estado: Option<String>,
}

// -------------------------
// Aggregate rows for the stats endpoints
// -------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConteoPorEstado {
    pub estado: String,
    pub cantidad: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResumenFacturas {
    pub total_facturas: i64,
    pub total_facturado: f64,
    pub total_cobrado: f64,
    pub cartera_pendiente: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResumenDistribucionesFila {
    pub estado: String,
    pub cantidad: i64,
    pub total_fundas: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResumenProduccion {
    pub total_ordenes: i64,
    pub total_solicitada: i64,
    pub total_producida: i64,
    pub total_defectuosa: i64,
}
