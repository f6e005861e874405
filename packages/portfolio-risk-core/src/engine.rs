//! Portfolio analysis entry point.

use crate::config::EngineConfig;
use crate::portfolio::{aggregate, analyze_holding, volatility_with};
use crate::recommendations;
use crate::types::{HoldingInput, PortfolioAnalysis};

/// Stateless risk engine parameterized by its tuning config.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a set of holdings.
    ///
    /// A portfolio with no positive total value yields zeroed metrics and no
    /// recommendations.
    pub fn analyze(&self, holdings: &[HoldingInput]) -> PortfolioAnalysis {
        let unweighted = holdings
            .iter()
            .map(|h| analyze_holding(h, &self.config))
            .collect();

        let (holdings, metrics) = aggregate(unweighted, &self.config);

        let recommendations = if metrics.total_value > 0.0 {
            recommendations::generate(&holdings, &metrics, &self.config)
        } else {
            Vec::new()
        };

        tracing::debug!(
            holdings = holdings.len(),
            total_value = metrics.total_value,
            risk_score = metrics.risk_score,
            risk_level = %metrics.risk_level,
            recommendations = recommendations.len(),
            "Portfolio analyzed"
        );

        PortfolioAnalysis {
            holdings,
            metrics,
            recommendations,
        }
    }

    /// Annualized volatility using this engine's annualization period.
    pub fn volatility(&self, prices: &[f64]) -> f64 {
        volatility_with(prices, self.config.trading_days_per_year)
    }
}

/// Analyze holdings with the default configuration.
pub fn analyze_portfolio(holdings: &[HoldingInput]) -> PortfolioAnalysis {
    RiskEngine::default().analyze(holdings)
}
