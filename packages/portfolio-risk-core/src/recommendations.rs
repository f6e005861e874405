//! Rule-based advisory messages.
//!
//! Rules run in a fixed order and their output order is part of the result:
//! concentration warnings, aggregate risk, loss alerts, diversification.

use crate::config::EngineConfig;
use crate::types::{
    HoldingAnalysis, PortfolioMetrics, Recommendation, RecommendationKind, RiskLevel,
};

/// Generate recommendations for an analyzed portfolio.
pub fn generate(
    holdings: &[HoldingAnalysis],
    metrics: &PortfolioMetrics,
    config: &EngineConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let multiple = holdings.len() > 1;

    if multiple {
        for h in holdings {
            if h.weight > config.concentration_weight_threshold {
                recommendations.push(Recommendation::new(
                    RecommendationKind::Warning,
                    format!(
                        "{} rappresenta il {:.1}% del portafoglio. Valuta di ridurre la concentrazione su un singolo titolo.",
                        h.symbol,
                        h.weight * 100.0
                    ),
                ));
            }
        }
    }

    if metrics.risk_level == RiskLevel::Alto {
        recommendations.push(Recommendation::new(
            RecommendationKind::Risk,
            "Il rischio complessivo del portafoglio è alto. Considera un ribilanciamento verso asset meno volatili come obbligazioni, fondi diversificati o titoli con dividendi.",
        ));
    }

    for h in holdings {
        if h.gain_loss_pct < config.loss_alert_threshold_pct {
            recommendations.push(Recommendation::new(
                RecommendationKind::Alert,
                format!(
                    "{} è in perdita del {:.1}%. Valuta se impostare o rivedere uno stop-loss.",
                    h.symbol,
                    h.gain_loss_pct.abs()
                ),
            ));
        }
    }

    if multiple && metrics.diversification_score < config.diversification_floor {
        recommendations.push(Recommendation::new(
            RecommendationKind::Info,
            "La diversificazione è bassa. Valuta di aggiungere asset poco correlati con le posizioni attuali.",
        ));
    }

    recommendations
}
