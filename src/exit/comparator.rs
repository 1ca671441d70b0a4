// Exit Comparator - redeem at NAV after cooldown vs. sell at market now
use crate::exit::{
    DepegScenarios, ExitAnalysis, ExitComparison, ExitConfig, MarketPath, MarketQuote, Recommendation,
    RedemptionPath, RedemptionQuote, ScenarioOutcome, ScenarioSet,
};
use crate::risk::RiskError;
use crate::utils::math::percent_of;

pub const MARKET_TIME_TO_LIQUIDITY: &str = "2–5 minutes";

/// Order share of quoted liquidity above which the slippage estimate is flagged
const LIQUIDITY_WARNING_SHARE: f64 = 0.02;

/// Compares the two ways out of a yield-bearing position
#[derive(Debug, Clone, Default)]
pub struct ExitComparator {
    config: ExitConfig,
}

impl ExitComparator {
    pub fn new(config: ExitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExitConfig {
        &self.config
    }

    /// Evaluate both exit paths for `amount` units and compare them.
    ///
    /// `amount` must be positive and every quote field finite and non-negative.
    pub fn compare(
        &self,
        amount: f64,
        redemption: &RedemptionQuote,
        market: &MarketQuote,
    ) -> Result<ExitAnalysis, RiskError> {
        validate_inputs(amount, redemption, market)?;

        let redemption_path = self.redemption_path(amount, redemption);
        let market_path = self.market_path(amount, market);
        let comparison = self.build_comparison(amount, &redemption_path, &market_path);

        Ok(ExitAnalysis {
            redemption_path,
            market_path,
            comparison,
        })
    }

    /// Hold through the cooldown, earning yield, then redeem at NAV. No fees.
    pub fn redemption_path(&self, amount: f64, quote: &RedemptionQuote) -> RedemptionPath {
        let yield_accrued = amount * self.config.daily_yield_rate * quote.cooldown_days;
        let final_value = amount * quote.nav + yield_accrued;

        let mut risk_notes = Vec::new();
        if quote.cooldown_days > 0.0 {
            risk_notes.push(format!(
                "Exposed to de-peg risk on {} for {} days before NAV settles",
                quote.asset, quote.cooldown_days
            ));
        } else {
            risk_notes.push("Settles at NAV without a cooldown".to_string());
        }
        if yield_accrued > 0.0 {
            risk_notes.push(format!(
                "Accrues an estimated {:.2} in yield during the cooldown",
                yield_accrued
            ));
        }

        RedemptionPath {
            final_value,
            yield_accrued,
            cost: 0.0,
            time_to_liquidity: format!("{} days", quote.cooldown_days),
            risk_notes,
        }
    }

    /// Sell now, paying slippage on notional plus a flat gas fee
    pub fn market_path(&self, amount: f64, quote: &MarketQuote) -> MarketPath {
        let notional = amount * quote.price;
        let slippage_loss = notional * self.config.slippage_rate;
        let gas_cost = self.config.gas_cost;
        let final_value = notional - slippage_loss - gas_cost;

        let mut risk_notes = vec![format!(
            "Slippage of {:.2}% costs an estimated {:.2}, plus {:.2} gas",
            self.config.slippage_rate * 100.0,
            slippage_loss,
            gas_cost
        )];
        if quote.liquidity == 0.0 {
            risk_notes.push(format!("No market liquidity quoted for {}; the sale may not fill", quote.asset));
        } else if notional > quote.liquidity * LIQUIDITY_WARNING_SHARE {
            risk_notes.push(format!(
                "Order is {:.1}% of available liquidity; realized slippage may exceed the estimate",
                notional / quote.liquidity * 100.0
            ));
        }
        if final_value < 0.0 {
            risk_notes.push("Fees exceed the sale proceeds".to_string());
        }

        MarketPath {
            final_value,
            slippage_loss,
            gas_cost,
            total_cost: slippage_loss + gas_cost,
            time_to_liquidity: MARKET_TIME_TO_LIQUIDITY.to_string(),
            risk_notes,
        }
    }

    fn build_comparison(&self, amount: f64, redemption: &RedemptionPath, market: &MarketPath) -> ExitComparison {
        let net_difference = redemption.final_value - market.final_value;

        // De-peg fraction at which the two routes pay out the same
        let breakeven_depeg_percent = ((market.total_cost - redemption.yield_accrued) / amount).abs() * 100.0;

        ExitComparison {
            net_difference,
            percent_difference: percent_of(net_difference, redemption.final_value),
            recommendation: Recommendation::from_difference(net_difference),
            breakeven_depeg_percent,
            scenarios: stress_scenarios(amount, redemption, market, &self.config.depeg_scenarios),
        }
    }
}

/// Only the redemption side is stressed: the de-peg hits the asset while it
/// sits in the cooldown, whereas a market exit is already settled.
fn stress_scenarios(
    amount: f64,
    redemption: &RedemptionPath,
    market: &MarketPath,
    scenarios: &DepegScenarios,
) -> ScenarioSet {
    let outcome = |depeg_fraction: f64| {
        let redemption_value = amount * (1.0 - depeg_fraction) + redemption.yield_accrued;
        let gain_loss = redemption_value - market.final_value;
        ScenarioOutcome {
            depeg_fraction,
            redemption_value,
            market_value: market.final_value,
            recommendation: Recommendation::from_difference(gain_loss),
            gain_loss,
        }
    };

    ScenarioSet {
        best: outcome(scenarios.best),
        mid: outcome(scenarios.mid),
        worst: outcome(scenarios.worst),
    }
}

fn validate_inputs(amount: f64, redemption: &RedemptionQuote, market: &MarketQuote) -> Result<(), RiskError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(RiskError::invalid_input(
            "amount",
            format!("must be a positive number, got {}", amount),
        ));
    }

    let fields = [
        ("nav", redemption.nav),
        ("cooldown_days", redemption.cooldown_days),
        ("price", market.price),
        ("liquidity", market.liquidity),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(RiskError::invalid_input(
                field,
                format!("must be a non-negative number, got {}", value),
            ));
        }
    }
    Ok(())
}
