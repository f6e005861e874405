//! Portfolio analytics.
//!
//! Per-holding analysis, weighted aggregation, and volatility/risk scoring.

mod aggregate;
mod holding;
mod risk;

pub use aggregate::aggregate;
pub use holding::analyze_holding;
pub use risk::{period_returns, risk_score, volatility, volatility_with};
