use thiserror::Error;

use super::settings::Settings;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid range: {field} must be between {min} and {max}, got {value}")]
    InvalidRange { field: String, min: f64, max: f64, value: f64 },
    #[error("Invalid format: {field} - {message}")]
    InvalidFormat { field: String, message: String },
    #[error("Inconsistent scenarios: {0}")]
    ScenarioOrder(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    // NaN fails both comparisons, so test the accepted interval directly
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::InvalidRange {
            field: field.to_string(),
            min,
            max,
            value,
        })
    }
}

/// Rates are fractions in [0, 1)
fn check_rate(field: &str, value: f64) -> ValidationResult<()> {
    check_range(field, value, 0.0, 1.0)?;
    if value >= 1.0 {
        return Err(ValidationError::InvalidRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
            value,
        });
    }
    Ok(())
}

impl Settings {
    pub fn validate(&self) -> ValidationResult<()> {
        let monitoring = &self.monitoring;
        if monitoring.poll_interval_seconds == 0 {
            return Err(ValidationError::InvalidRange {
                field: "monitoring.poll_interval_seconds".to_string(),
                min: 1.0,
                max: u64::MAX as f64,
                value: 0.0,
            });
        }
        if monitoring.fetch_timeout_seconds == 0 {
            return Err(ValidationError::InvalidRange {
                field: "monitoring.fetch_timeout_seconds".to_string(),
                min: 1.0,
                max: u64::MAX as f64,
                value: 0.0,
            });
        }
        if monitoring.history_limit == 0 {
            return Err(ValidationError::InvalidRange {
                field: "monitoring.history_limit".to_string(),
                min: 1.0,
                max: usize::MAX as f64,
                value: 0.0,
            });
        }
        if monitoring.snapshot_path.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "monitoring.snapshot_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let exit = &self.exit;
        check_rate("exit.slippage_rate", exit.slippage_rate)?;
        check_rate("exit.daily_yield_rate", exit.daily_yield_rate)?;
        check_rate("exit.depeg_best", exit.depeg_best)?;
        check_rate("exit.depeg_mid", exit.depeg_mid)?;
        check_rate("exit.depeg_worst", exit.depeg_worst)?;
        check_range("exit.gas_cost", exit.gas_cost, 0.0, f64::MAX)?;
        if !(exit.depeg_best <= exit.depeg_mid && exit.depeg_mid <= exit.depeg_worst) {
            return Err(ValidationError::ScenarioOrder(format!(
                "expected best <= mid <= worst, got {} / {} / {}",
                exit.depeg_best, exit.depeg_mid, exit.depeg_worst
            )));
        }

        let export = &self.export;
        check_rate("export.tax_rate", export.tax_rate)?;
        if !(export.usd_to_kes.is_finite() && export.usd_to_kes > 0.0) {
            return Err(ValidationError::InvalidRange {
                field: "export.usd_to_kes".to_string(),
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: export.usd_to_kes,
            });
        }
        if let Some(path) = &export.output_path {
            if path.trim().is_empty() {
                return Err(ValidationError::InvalidFormat {
                    field: "export.output_path".to_string(),
                    message: "must not be empty when set".to_string(),
                });
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "logging.level".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_full_slippage() {
        let mut settings = Settings::default();
        settings.exit.slippage_rate = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidRange { ref field, .. }) if field == "exit.slippage_rate"
        ));
    }

    #[test]
    fn test_rejects_nan_gas() {
        let mut settings = Settings::default();
        settings.exit.gas_cost = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unordered_scenarios() {
        let mut settings = Settings::default();
        settings.exit.depeg_mid = 0.05;
        assert!(matches!(settings.validate(), Err(ValidationError::ScenarioOrder(_))));
    }

    #[test]
    fn test_rejects_zero_interval_and_rate() {
        let mut settings = Settings::default();
        settings.monitoring.poll_interval_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.export.usd_to_kes = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidRange { ref field, .. }) if field == "export.usd_to_kes"
        ));
    }
}
