use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::utils::math::to_decimal;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    KES,
    USD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KES => "KES",
            Currency::USD => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KES" => Ok(Currency::KES),
            "USD" => Ok(Currency::USD),
            other => Err(AppError::ValidationError(format!("Unknown currency: {}", other))),
        }
    }
}

/// Explicit conversion table; only the USD/KES pair is quoted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRates {
    usd_to_kes: f64,
}

impl ExchangeRates {
    pub fn new(usd_to_kes: f64) -> Self {
        Self { usd_to_kes }
    }

    pub fn usd_to_kes(&self) -> f64 {
        self.usd_to_kes
    }

    /// Units of `to` per unit of `from`
    pub fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, AppError> {
        match (from, to) {
            (Currency::KES, Currency::KES) | (Currency::USD, Currency::USD) => Ok(Decimal::ONE),
            (Currency::USD, Currency::KES) => self.quoted_usd_to_kes(),
            (Currency::KES, Currency::USD) => Ok(Decimal::ONE / self.quoted_usd_to_kes()?),
        }
    }

    fn quoted_usd_to_kes(&self) -> Result<Decimal, AppError> {
        to_decimal(self.usd_to_kes)
            .filter(|rate| rate.is_sign_positive() && !rate.is_zero())
            .ok_or_else(|| AppError::ValidationError(format!("Invalid USD/KES rate: {}", self.usd_to_kes)))
    }

    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal, AppError> {
        Ok(amount * self.rate(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_identity_rate() {
        let rates = ExchangeRates::new(129.0);
        assert_eq!(rates.rate(Currency::KES, Currency::KES).unwrap(), Decimal::ONE);
        assert_eq!(rates.rate(Currency::USD, Currency::USD).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_usd_kes_pair() {
        let rates = ExchangeRates::new(129.0);
        assert_eq!(rates.rate(Currency::USD, Currency::KES).unwrap(), dec("129"));
        let back = rates.rate(Currency::KES, Currency::USD).unwrap();
        assert_eq!((back * dec("129")).round_dp(10), Decimal::ONE);
        assert_eq!(
            rates.convert(dec("2.5"), Currency::USD, Currency::KES).unwrap(),
            dec("322.5")
        );
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        for bad in [0.0, -1.0, f64::NAN] {
            let rates = ExchangeRates::new(bad);
            assert!(rates.rate(Currency::USD, Currency::KES).is_err());
        }
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert!("EUR".parse::<Currency>().is_err());
    }
}
