//! Currency rounding helpers

/// Round to cent precision (two decimal places).
///
/// All currency amounts in the engine pass through this before being stored
/// or returned, so balances and win amounts never accumulate sub-cent noise.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_cents() {
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(12.3449), 12.34);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round2_idempotent() {
        for &x in &[0.0, 0.015, 1.0 / 3.0, 12.499999, 9999.995, -2.675] {
            let once = round2(x);
            assert_eq!(round2(once), once);
        }
    }

    #[test]
    fn test_bet_amount_convention() {
        // bet 1, coin value 0.10 under the fixed 10-line stake convention
        assert_eq!(round2(1.0 * 10.0 * 0.10), 1.0);
    }
}
