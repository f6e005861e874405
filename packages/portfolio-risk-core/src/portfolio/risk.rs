//! Volatility estimation and risk scoring.

use crate::config::{EngineConfig, TRADING_DAYS_PER_YEAR};
use crate::types::RiskLevel;

/// Simple period returns for consecutive prices.
///
/// Pairs whose earlier price is not positive are skipped.
pub fn period_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            if prev > 0.0 {
                Some((curr - prev) / prev)
            } else {
                tracing::trace!(prev, curr, "Skipping price pair with non-positive base");
                None
            }
        })
        .collect()
}

/// Annualized volatility percentage of a price series, oldest first.
///
/// Uses population variance of simple returns scaled by the square root of
/// 252 trading days. Returns 0 when fewer than two usable returns exist.
pub fn volatility(prices: &[f64]) -> f64 {
    volatility_with(prices, TRADING_DAYS_PER_YEAR)
}

/// Same as [`volatility`] with an explicit annualization period.
pub fn volatility_with(prices: &[f64], trading_days_per_year: f64) -> f64 {
    let returns = period_returns(prices);
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt() * trading_days_per_year.sqrt() * 100.0
}

/// Map weighted volatility to a 0..cap risk score.
pub fn risk_score(weighted_volatility: f64, config: &EngineConfig) -> f64 {
    (weighted_volatility * config.risk_score_multiplier).min(config.risk_score_cap)
}

impl RiskLevel {
    /// Bucket a risk score. Scores exactly on a threshold fall in the lower tier.
    pub fn from_score(score: f64, config: &EngineConfig) -> Self {
        if score > config.high_risk_threshold {
            RiskLevel::Alto
        } else if score > config.medium_risk_threshold {
            RiskLevel::Medio
        } else {
            RiskLevel::Basso
        }
    }
}
