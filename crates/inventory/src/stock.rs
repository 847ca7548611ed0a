use serde::{Deserialize, Serialize};

/// An item is low on stock when it sits at or below its minimum threshold.
///
/// Items with `cantidad_minima <= 0` never alert: a zero minimum means the
/// threshold was never configured.
pub fn es_stock_bajo(cantidad_actual: f64, cantidad_minima: f64) -> bool {
    cantidad_minima > 0.0 && cantidad_actual <= cantidad_minima
}

/// An item is overstocked when it sits at or above its configured maximum.
pub fn es_sobre_stock(cantidad_actual: f64, cantidad_maxima: f64) -> bool {
    cantidad_maxima > 0.0 && cantidad_actual >= cantidad_maxima
}

/// Stock level classification for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NivelStock {
    Bajo,
    Normal,
    Exceso,
}

impl NivelStock {
    pub fn as_str(&self) -> &'static str {
        match self {
            NivelStock::Bajo => "bajo",
            NivelStock::Normal => "normal",
            NivelStock::Exceso => "exceso",
        }
    }
}

/// Classify an item against its thresholds. Low stock wins over overstock
/// when the thresholds are misconfigured (minima >= maxima).
pub fn clasificar_stock(
    cantidad_actual: f64,
    cantidad_minima: f64,
    cantidad_maxima: f64,
) -> NivelStock {
    if es_stock_bajo(cantidad_actual, cantidad_minima) {
        NivelStock::Bajo
    } else if es_sobre_stock(cantidad_actual, cantidad_maxima) {
        NivelStock::Exceso
    } else {
        NivelStock::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_bajo_en_o_bajo_el_minimo() {
        assert!(es_stock_bajo(5.0, 10.0));
        assert!(es_stock_bajo(10.0, 10.0));
        assert!(!es_stock_bajo(11.0, 10.0));
    }

    #[test]
    fn minimo_sin_configurar_nunca_alerta() {
        assert!(!es_stock_bajo(0.0, 0.0));
        assert!(!es_stock_bajo(5.0, 0.0));
        assert!(!es_stock_bajo(5.0, -1.0));
    }

    #[test]
    fn sobre_stock_en_o_sobre_el_maximo() {
        assert!(es_sobre_stock(100.0, 100.0));
        assert!(es_sobre_stock(150.0, 100.0));
        assert!(!es_sobre_stock(99.0, 100.0));
        assert!(!es_sobre_stock(99.0, 0.0));
    }

    #[test]
    fn clasificacion() {
        assert_eq!(clasificar_stock(5.0, 10.0, 100.0), NivelStock::Bajo);
        assert_eq!(clasificar_stock(50.0, 10.0, 100.0), NivelStock::Normal);
        assert_eq!(clasificar_stock(100.0, 10.0, 100.0), NivelStock::Exceso);
        // Sin umbrales configurados todo es normal.
        assert_eq!(clasificar_stock(0.0, 0.0, 0.0), NivelStock::Normal);
    }
}
