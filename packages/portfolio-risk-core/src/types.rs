//! Core data types for the portfolio risk engine.
//!
//! Everything here is derived fresh on each call; nothing is persisted or
//! shared between analyses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single holding as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingInput {
    /// Ticker symbol
    pub symbol: String,
    /// Number of units held
    pub quantity: f64,
    /// Cost basis per unit
    pub buy_price: f64,
    /// Current market price per unit
    pub current_price: f64,
    /// Market sensitivity; missing or zero means 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    /// Daily closes, oldest first
    #[serde(default)]
    pub historical: Vec<f64>,
}

impl HoldingInput {
    /// Create a holding without beta or price history.
    pub fn new(symbol: &str, quantity: f64, buy_price: f64, current_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            quantity,
            buy_price,
            current_price,
            beta: None,
            historical: Vec::new(),
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_historical(mut self, historical: Vec<f64>) -> Self {
        self.historical = historical;
        self
    }

    /// Beta with the falsy-to-1.0 default applied.
    pub fn effective_beta(&self) -> f64 {
        match self.beta {
            Some(b) if b != 0.0 && !b.is_nan() => b,
            _ => 1.0,
        }
    }
}

/// Per-holding figures before the portfolio total is known.
///
/// Produced by the holding analyzer. It has no weight field at all; the only
/// way to get one is [`UnweightedHolding::with_weight`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnweightedHolding {
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub cost: f64,
    pub gain_loss: f64,
    pub gain_loss_pct: f64,
    pub return_1y: f64,
    pub volatility: f64,
    pub beta: f64,
    pub history_points: usize,
}

impl UnweightedHolding {
    /// Consume the record and attach its share of the portfolio.
    pub fn with_weight(self, weight: f64) -> HoldingAnalysis {
        HoldingAnalysis {
            symbol: self.symbol,
            quantity: self.quantity,
            buy_price: self.buy_price,
            current_price: self.current_price,
            current_value: self.current_value,
            cost: self.cost,
            gain_loss: self.gain_loss,
            gain_loss_pct: self.gain_loss_pct,
            weight,
            return_1y: self.return_1y,
            volatility: self.volatility,
            beta: self.beta,
            history_points: self.history_points,
        }
    }
}

/// Per-holding analysis including its portfolio weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingAnalysis {
    /// Ticker symbol (uppercase)
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: f64,
    /// quantity * current_price
    pub current_value: f64,
    /// quantity * buy_price
    pub cost: f64,
    /// Unrealized gain/loss in currency
    pub gain_loss: f64,
    /// Unrealized gain/loss percentage
    pub gain_loss_pct: f64,
    /// Fraction of total portfolio value (0..1)
    pub weight: f64,
    /// Return since the first historical close, in percent
    #[serde(rename = "return1Y")]
    pub return_1y: f64,
    /// Annualized volatility percentage
    pub volatility: f64,
    pub beta: f64,
    /// Number of historical prices supplied. Zero means return and
    /// volatility are placeholders rather than measurements.
    pub history_points: usize,
}

impl HoldingAnalysis {
    /// Whether return and volatility were computed from real price history.
    pub fn has_history(&self) -> bool {
        self.history_points > 0
    }
}

/// Qualitative risk bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RiskLevel {
    #[default]
    Basso,
    Medio,
    Alto,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Basso => "Basso",
            RiskLevel::Medio => "Medio",
            RiskLevel::Alto => "Alto",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Portfolio-wide aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Sum of all holding values
    pub total_value: f64,
    /// Sum of all holding costs
    pub total_cost: f64,
    /// total_value - total_cost
    pub total_gain_loss: f64,
    /// Guarded gain/loss percentage on total cost
    pub total_gain_loss_pct: f64,
    /// Value-weighted 1-year return percentage
    #[serde(rename = "portfolioReturn1Y")]
    pub portfolio_return_1y: f64,
    /// Herfindahl-Hirschman index of weights (0..1)
    pub concentration_index: f64,
    /// (1 - concentration_index) * 100
    pub diversification_score: f64,
    /// Value-weighted annualized volatility percentage
    pub weighted_volatility: f64,
    pub weighted_beta: f64,
    /// 0..100
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub holding_count: usize,
}

/// Category of an advisory message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Risk,
    Alert,
    Info,
}

/// A single advisory message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Full result of one engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PortfolioAnalysis {
    pub holdings: Vec<HoldingAnalysis>,
    pub metrics: PortfolioMetrics,
    /// Ordered as generated; consumers must not re-sort.
    pub recommendations: Vec<Recommendation>,
}

/// API response wrapper used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
