use serde::{Deserialize, Serialize};

use infopan_core::{DomainError, round2};

/// Default IVA rate (Ecuador, percent).
pub const IVA_PORCENTAJE_DEFAULT: f64 = 15.0;

/// Invoice status lifecycle.
///
/// `Emitida → PagadaParcial → Pagada` is driven by payments; `Vencida` and
/// `Anulada` are only ever set by external action, never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoFactura {
    Emitida,
    PagadaParcial,
    Pagada,
    Vencida,
    Anulada,
}

impl EstadoFactura {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoFactura::Emitida => "emitida",
            EstadoFactura::PagadaParcial => "pagada_parcial",
            EstadoFactura::Pagada => "pagada",
            EstadoFactura::Vencida => "vencida",
            EstadoFactura::Anulada => "anulada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "emitida" => Some(EstadoFactura::Emitida),
            "pagada_parcial" => Some(EstadoFactura::PagadaParcial),
            "pagada" => Some(EstadoFactura::Pagada),
            "vencida" => Some(EstadoFactura::Vencida),
            "anulada" => Some(EstadoFactura::Anulada),
            _ => None,
        }
    }

    /// Invariant: an annulled invoice accepts no further payments.
    pub fn acepta_cobros(&self) -> bool {
        *self != EstadoFactura::Anulada
    }
}

impl core::fmt::Display for EstadoFactura {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully computed monetary fields of an invoice, all rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacturaTotales {
    pub subtotal: f64,
    pub porcentaje_iva: f64,
    pub valor_iva: f64,
    pub total: f64,
    pub monto_pagado: f64,
    pub saldo_pendiente: f64,
    pub estado: EstadoFactura,
}

impl FacturaTotales {
    /// Compute invoice totals from the subtotal and optional overrides.
    ///
    /// Callers may supply explicit `valor_iva`, `total` or `saldo_pendiente`
    /// (e.g. when importing documents already authorized by the SRI); absent
    /// values are derived:
    ///
    /// ```text
    /// valor_iva       = subtotal * porcentaje_iva / 100
    /// total           = subtotal + valor_iva
    /// saldo_pendiente = total - monto_pagado
    /// ```
    pub fn calcular(
        subtotal: f64,
        porcentaje_iva: Option<f64>,
        valor_iva: Option<f64>,
        total: Option<f64>,
        monto_pagado: Option<f64>,
        saldo_pendiente: Option<f64>,
    ) -> Result<Self, DomainError> {
        if !subtotal.is_finite() || subtotal <= 0.0 {
            return Err(DomainError::validation("El subtotal debe ser mayor a 0"));
        }
        let porcentaje_iva = porcentaje_iva.unwrap_or(IVA_PORCENTAJE_DEFAULT);
        if !porcentaje_iva.is_finite() || porcentaje_iva < 0.0 {
            return Err(DomainError::validation(
                "El porcentaje de IVA no puede ser negativo",
            ));
        }
        let monto_pagado = monto_pagado.unwrap_or(0.0);
        if !monto_pagado.is_finite() || monto_pagado < 0.0 {
            return Err(DomainError::validation(
                "El monto pagado no puede ser negativo",
            ));
        }

        let subtotal = round2(subtotal);
        let valor_iva = round2(valor_iva.unwrap_or(subtotal * porcentaje_iva / 100.0));
        let total = round2(total.unwrap_or(subtotal + valor_iva));
        let monto_pagado = round2(monto_pagado);
        let saldo_pendiente = round2(saldo_pendiente.unwrap_or(total - monto_pagado));

        Ok(Self {
            subtotal,
            porcentaje_iva,
            valor_iva,
            total,
            monto_pagado,
            saldo_pendiente,
            estado: derivar_estado(total, monto_pagado),
        })
    }
}

/// Result of applying one collection against an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AplicacionCobro {
    pub monto_pagado: f64,
    pub saldo_pendiente: f64,
    pub estado: EstadoFactura,
}

/// Apply a payment of `monto` against an invoice.
///
/// The outstanding balance is clamped at 0: overpayment is accepted and
/// leaves `saldo_pendiente == 0.0` with the invoice marked `pagada`.
pub fn aplicar_cobro(
    total: f64,
    monto_pagado_actual: f64,
    monto: f64,
    estado_actual: EstadoFactura,
) -> Result<AplicacionCobro, DomainError> {
    if !monto.is_finite() || monto <= 0.0 {
        return Err(DomainError::validation("El monto del cobro debe ser mayor a 0"));
    }
    if !estado_actual.acepta_cobros() {
        return Err(DomainError::invariant(
            "No se pueden registrar cobros sobre una factura anulada",
        ));
    }

    let monto_pagado = round2(monto_pagado_actual + monto);
    let saldo_pendiente = round2((total - monto_pagado).max(0.0));

    Ok(AplicacionCobro {
        monto_pagado,
        saldo_pendiente,
        estado: derivar_estado(total, monto_pagado),
    })
}

/// Pure status derivation from `(total, monto_pagado)`.
pub fn derivar_estado(total: f64, monto_pagado: f64) -> EstadoFactura {
    if monto_pagado >= total {
        EstadoFactura::Pagada
    } else if monto_pagado > 0.0 {
        EstadoFactura::PagadaParcial
    } else {
        EstadoFactura::Emitida
    }
}

/// Estado to persist after a full edit of an invoice.
///
/// `Vencida` and `Anulada` are set only by explicit action and survive
/// edits; invoices in the payment-driven lifecycle take the derived estado.
pub fn estado_tras_edicion(actual: EstadoFactura, derivado: EstadoFactura) -> EstadoFactura {
    match actual {
        EstadoFactura::Vencida | EstadoFactura::Anulada => actual,
        _ => derivado,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn calcula_iva_y_total_con_tarifa_por_defecto() {
        let t = FacturaTotales::calcular(100.0, None, None, None, None, None).unwrap();
        assert_eq!(t.porcentaje_iva, 15.0);
        assert_eq!(t.valor_iva, 15.0);
        assert_eq!(t.total, 115.0);
        assert_eq!(t.monto_pagado, 0.0);
        assert_eq!(t.saldo_pendiente, 115.0);
        assert_eq!(t.estado, EstadoFactura::Emitida);
    }

    #[test]
    fn respeta_valores_explicitos() {
        let t = FacturaTotales::calcular(
            100.0,
            Some(15.0),
            Some(12.0),
            Some(112.0),
            Some(12.0),
            Some(100.0),
        )
        .unwrap();
        assert_eq!(t.valor_iva, 12.0);
        assert_eq!(t.total, 112.0);
        assert_eq!(t.saldo_pendiente, 100.0);
        assert_eq!(t.estado, EstadoFactura::PagadaParcial);
    }

    #[test]
    fn rechaza_subtotal_no_positivo() {
        for s in [0.0, -1.0, f64::NAN] {
            let err = FacturaTotales::calcular(s, None, None, None, None, None).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn rechaza_iva_negativo() {
        let err =
            FacturaTotales::calcular(100.0, Some(-1.0), None, None, None, None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cobro_parcial_y_luego_total() {
        let t = FacturaTotales::calcular(100.0, None, None, None, None, None).unwrap();

        let p1 = aplicar_cobro(t.total, t.monto_pagado, 15.0, t.estado).unwrap();
        assert_eq!(p1.monto_pagado, 15.0);
        assert_eq!(p1.saldo_pendiente, 100.0);
        assert_eq!(p1.estado, EstadoFactura::PagadaParcial);

        let p2 = aplicar_cobro(t.total, p1.monto_pagado, 100.0, p1.estado).unwrap();
        assert_eq!(p2.monto_pagado, 115.0);
        assert_eq!(p2.saldo_pendiente, 0.0);
        assert_eq!(p2.estado, EstadoFactura::Pagada);
    }

    #[test]
    fn sobrepago_deja_saldo_en_cero() {
        let p = aplicar_cobro(115.0, 0.0, 200.0, EstadoFactura::Emitida).unwrap();
        assert_eq!(p.saldo_pendiente, 0.0);
        assert_eq!(p.estado, EstadoFactura::Pagada);
    }

    #[test]
    fn rechaza_cobro_no_positivo() {
        let err = aplicar_cobro(115.0, 0.0, 0.0, EstadoFactura::Emitida).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rechaza_cobro_sobre_factura_anulada() {
        let err = aplicar_cobro(115.0, 0.0, 10.0, EstadoFactura::Anulada).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cobro_sobre_factura_vencida_es_valido() {
        // Overdue invoices still collect; only annulled ones are frozen.
        let p = aplicar_cobro(115.0, 0.0, 115.0, EstadoFactura::Vencida).unwrap();
        assert_eq!(p.estado, EstadoFactura::Pagada);
    }

    #[test]
    fn derivacion_de_estado_tabla() {
        assert_eq!(derivar_estado(115.0, 0.0), EstadoFactura::Emitida);
        assert_eq!(derivar_estado(115.0, 50.0), EstadoFactura::PagadaParcial);
        assert_eq!(derivar_estado(115.0, 115.0), EstadoFactura::Pagada);
        assert_eq!(derivar_estado(115.0, 120.0), EstadoFactura::Pagada);
    }

    #[test]
    fn edicion_no_revierte_estados_externos() {
        // Recomputing totals on an edit with no payments derives Emitida...
        let t = FacturaTotales::calcular(100.0, None, None, None, Some(0.0), None).unwrap();
        assert_eq!(t.estado, EstadoFactura::Emitida);

        // ...but an annulled or overdue invoice keeps its estado.
        assert_eq!(
            estado_tras_edicion(EstadoFactura::Anulada, t.estado),
            EstadoFactura::Anulada
        );
        assert_eq!(
            estado_tras_edicion(EstadoFactura::Vencida, t.estado),
            EstadoFactura::Vencida
        );
        assert_eq!(
            estado_tras_edicion(EstadoFactura::PagadaParcial, t.estado),
            EstadoFactura::Emitida
        );
    }

    #[test]
    fn estado_serializa_en_snake_case() {
        let s = serde_json::to_string(&EstadoFactura::PagadaParcial).unwrap();
        assert_eq!(s, "\"pagada_parcial\"");
        assert_eq!(EstadoFactura::parse("pagada_parcial"), Some(EstadoFactura::PagadaParcial));
        assert_eq!(EstadoFactura::parse("otro"), None);
    }

    proptest! {
        #[test]
        fn iva_y_total_redondeados(subtotal in 0.01f64..1_000_000.0, iva in 0.0f64..30.0) {
            let t = FacturaTotales::calcular(subtotal, Some(iva), None, None, None, None).unwrap();
            let subtotal = infopan_core::round2(subtotal);
            prop_assert_eq!(t.valor_iva, infopan_core::round2(subtotal * iva / 100.0));
            prop_assert_eq!(t.total, infopan_core::round2(subtotal + t.valor_iva));
        }

        #[test]
        fn saldo_nunca_negativo(total in 0.01f64..1_000_000.0, pagado in 0.0f64..1_000_000.0, monto in 0.01f64..1_000_000.0) {
            let p = aplicar_cobro(total, pagado, monto, EstadoFactura::Emitida).unwrap();
            prop_assert!(p.saldo_pendiente >= 0.0);
            prop_assert_eq!(
                p.saldo_pendiente,
                infopan_core::round2((total - p.monto_pagado).max(0.0))
            );
        }

        #[test]
        fn estado_es_funcion_de_total_y_pagado(total in 0.01f64..1_000_000.0, pagado in 0.0f64..2_000_000.0) {
            let estado = derivar_estado(total, pagado);
            if pagado >= total {
                prop_assert_eq!(estado, EstadoFactura::Pagada);
            } else if pagado > 0.0 {
                prop_assert_eq!(estado, EstadoFactura::PagadaParcial);
            } else {
                prop_assert_eq!(estado, EstadoFactura::Emitida);
            }
        }
    }
}
