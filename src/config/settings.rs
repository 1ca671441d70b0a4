use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::exit::{DepegScenarios, ExitConfig};
use crate::models::{Currency, ExchangeRates};
use crate::risk::ScoringConfig;

/// Default location of the optional settings file
pub const DEFAULT_CONFIG_PATH: &str = "config/pulse.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub monitoring: MonitoringSettings,
    pub scoring: ScoringConfig,
    pub exit: ExitSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSettings {
    pub poll_interval_seconds: u64,
    pub fetch_timeout_seconds: u64,
    pub history_limit: usize,
    pub snapshot_path: String,
    pub run_once: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSettings {
    pub slippage_rate: f64,
    pub gas_cost: f64,
    pub daily_yield_rate: f64,
    pub depeg_best: f64,
    pub depeg_mid: f64,
    pub depeg_worst: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    pub local_currency: Currency,
    pub usd_to_kes: f64,
    pub tax_rate: f64,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        MonitoringSettings {
            poll_interval_seconds: 60,
            fetch_timeout_seconds: 10,
            history_limit: 500,
            snapshot_path: "data/metrics.json".to_string(),
            run_once: false,
        }
    }
}

impl Default for ExitSettings {
    fn default() -> Self {
        let exit = ExitConfig::default();
        ExitSettings {
            slippage_rate: exit.slippage_rate,
            gas_cost: exit.gas_cost,
            daily_yield_rate: exit.daily_yield_rate,
            depeg_best: exit.depeg_scenarios.best,
            depeg_mid: exit.depeg_scenarios.mid,
            depeg_worst: exit.depeg_scenarios.worst,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            local_currency: Currency::KES,
            usd_to_kes: 129.0,
            tax_rate: 0.15,
            output_path: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ExitSettings {
    pub fn to_exit_config(&self) -> ExitConfig {
        ExitConfig {
            slippage_rate: self.slippage_rate,
            gas_cost: self.gas_cost,
            daily_yield_rate: self.daily_yield_rate,
            depeg_scenarios: DepegScenarios {
                best: self.depeg_best,
                mid: self.depeg_mid,
                worst: self.depeg_worst,
            },
        }
    }
}

impl ExportSettings {
    pub fn exchange_rates(&self) -> ExchangeRates {
        ExchangeRates::new(self.usd_to_kes)
    }
}

impl Settings {
    /// Defaults, then the settings file (`PULSE_CONFIG` or `config/pulse.toml`),
    /// then `PULSE__SECTION__KEY` environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let path = env::var("PULSE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(&path, Environment::with_prefix("PULSE"))
    }

    /// Layer a specific file and environment source over the defaults
    pub fn from_sources(path: &str, environment: Environment) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name(path).required(false))
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
