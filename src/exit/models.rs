// Exit comparison inputs and results
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol redemption offer: NAV paid out after a cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionQuote {
    pub asset: String,
    pub nav: f64,
    pub cooldown_days: f64,
}

/// Secondary-market offer: sell now at `price` into `liquidity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub asset: String,
    pub price: f64,
    pub liquidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Wait,
    ExitNow,
}

impl Recommendation {
    /// Waiting wins only when it is strictly better; ties favour exiting
    pub fn from_difference(redemption_minus_market: f64) -> Self {
        if redemption_minus_market > 0.0 {
            Recommendation::Wait
        } else {
            Recommendation::ExitNow
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Wait => f.write_str("WAIT"),
            Recommendation::ExitNow => f.write_str("EXIT_NOW"),
        }
    }
}

/// Strategy-agnostic view of one exit route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitPath {
    pub final_value: f64,
    pub cost: f64,
    pub time_to_liquidity: String,
    pub risk_notes: Vec<String>,
}

/// Wait out the cooldown and redeem at NAV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionPath {
    pub final_value: f64,
    pub yield_accrued: f64,
    pub cost: f64,
    pub time_to_liquidity: String,
    pub risk_notes: Vec<String>,
}

impl RedemptionPath {
    pub fn as_exit_path(&self) -> ExitPath {
        ExitPath {
            final_value: self.final_value,
            cost: self.cost,
            time_to_liquidity: self.time_to_liquidity.clone(),
            risk_notes: self.risk_notes.clone(),
        }
    }
}

/// Sell immediately on the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPath {
    pub final_value: f64,
    pub slippage_loss: f64,
    pub gas_cost: f64,
    pub total_cost: f64,
    pub time_to_liquidity: String,
    pub risk_notes: Vec<String>,
}

impl MarketPath {
    pub fn as_exit_path(&self) -> ExitPath {
        ExitPath {
            final_value: self.final_value,
            cost: self.total_cost,
            time_to_liquidity: self.time_to_liquidity.clone(),
            risk_notes: self.risk_notes.clone(),
        }
    }
}

/// Redemption re-valued under one de-peg stress level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub depeg_fraction: f64,
    pub redemption_value: f64,
    pub market_value: f64,
    pub recommendation: Recommendation,
    pub gain_loss: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub best: ScenarioOutcome,
    pub mid: ScenarioOutcome,
    pub worst: ScenarioOutcome,
}

impl ScenarioSet {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ScenarioOutcome)> {
        [("best", &self.best), ("mid", &self.mid), ("worst", &self.worst)].into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitComparison {
    pub net_difference: f64,
    /// `None` when the redemption path is worth nothing and the ratio is undefined
    pub percent_difference: Option<f64>,
    pub recommendation: Recommendation,
    pub breakeven_depeg_percent: f64,
    pub scenarios: ScenarioSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitAnalysis {
    pub redemption_path: RedemptionPath,
    pub market_path: MarketPath,
    pub comparison: ExitComparison,
}
