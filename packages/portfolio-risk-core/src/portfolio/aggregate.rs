//! Portfolio-wide weighted aggregates.
//!
//! Aggregation runs after every holding has been analyzed: weights are only
//! knowable once the total value is.

use super::risk::risk_score;
use crate::config::EngineConfig;
use crate::types::{HoldingAnalysis, PortfolioMetrics, RiskLevel, UnweightedHolding};

/// Normalize weights and compute portfolio metrics.
///
/// When the total value is not positive the weights are left at 0 and the
/// metrics stay zeroed with a `Basso` risk level.
pub fn aggregate(
    holdings: Vec<UnweightedHolding>,
    config: &EngineConfig,
) -> (Vec<HoldingAnalysis>, PortfolioMetrics) {
    let total_value: f64 = holdings.iter().map(|h| h.current_value).sum();
    let total_cost: f64 = holdings.iter().map(|h| h.cost).sum();
    let holding_count = holdings.len();

    if total_value <= 0.0 {
        let weighted = holdings.into_iter().map(|h| h.with_weight(0.0)).collect();
        let metrics = PortfolioMetrics {
            holding_count,
            risk_level: RiskLevel::Basso,
            ..Default::default()
        };
        return (weighted, metrics);
    }

    let weighted: Vec<HoldingAnalysis> = holdings
        .into_iter()
        .map(|h| {
            let weight = h.current_value / total_value;
            h.with_weight(weight)
        })
        .collect();

    let mut portfolio_return_1y = 0.0;
    let mut weighted_volatility = 0.0;
    let mut weighted_beta = 0.0;
    let mut concentration_index = 0.0;
    for h in &weighted {
        portfolio_return_1y += h.weight * h.return_1y;
        weighted_volatility += h.weight * h.volatility;
        weighted_beta += h.weight * h.beta;
        concentration_index += h.weight * h.weight;
    }

    let total_gain_loss = total_value - total_cost;
    let total_gain_loss_pct = if total_cost > 0.0 {
        (total_gain_loss / total_cost) * 100.0
    } else {
        0.0
    };

    let risk_score = risk_score(weighted_volatility, config);

    let metrics = PortfolioMetrics {
        total_value,
        total_cost,
        total_gain_loss,
        total_gain_loss_pct,
        portfolio_return_1y,
        concentration_index,
        diversification_score: (1.0 - concentration_index) * 100.0,
        weighted_volatility,
        weighted_beta,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score, config),
        holding_count,
    };

    (weighted, metrics)
}
