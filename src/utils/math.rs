use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// `part / base * 100`, or `None` when the base is zero or the result is not finite
pub fn percent_of(part: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let percent = part / base * 100.0;
    percent.is_finite().then_some(percent)
}

/// Convert an `f64` amount into a `Decimal`, rejecting NaN and infinities
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Round a money amount to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(10.0, 200.0), Some(5.0));
        assert_eq!(percent_of(-10.0, 200.0), Some(-5.0));
        assert_eq!(percent_of(10.0, 0.0), None);
        assert_eq!(percent_of(0.0, -0.0), None);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::from_str("12.345").unwrap()), Decimal::from_str("12.35").unwrap());
        assert_eq!(round_money(Decimal::from_str("-0.005").unwrap()), Decimal::from_str("-0.01").unwrap());
    }

    #[test]
    fn test_to_decimal_rejects_nan() {
        assert!(to_decimal(f64::NAN).is_none());
        assert_eq!(to_decimal(2.5), Some(Decimal::from_str("2.5").unwrap()));
    }
}
