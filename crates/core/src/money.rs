//! Monetary rounding.
//!
//! Amounts travel as `f64` and are normalized to 2 decimal places at every
//! domain boundary, matching the fiscal fields on invoices (USD, SRI).

/// Round a monetary amount to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(15.006), 15.01);
        assert_eq!(round2(15.004), 15.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn keeps_exact_values_untouched() {
        assert_eq!(round2(115.0), 115.0);
        assert_eq!(round2(-3.25), -3.25);
        assert_eq!(round2(0.0), 0.0);
    }
}
