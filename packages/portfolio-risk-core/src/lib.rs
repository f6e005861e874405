//! Portfolio Risk Core - risk metrics and recommendations for a set of holdings.
//!
//! This crate turns holdings (quantities, cost basis, prices, betas and
//! historical closes) into portfolio-level statistics and advisory messages:
//!
//! - **Holding analysis**: market value, gain/loss, 1-year return, volatility
//! - **Aggregation**: weighted return/volatility/beta, HHI concentration,
//!   diversification score, risk score and level
//! - **Recommendations**: ordered, rule-based warnings, alerts and suggestions
//! - **Feed**: concurrent market data fan-out with an injectable TTL cache
//!
//! # Example
//!
//! ```rust
//! use portfolio_risk_core::{analyze_portfolio, HoldingInput};
//!
//! let holdings = vec![
//!     HoldingInput::new("AAPL", 10.0, 150.0, 175.0).with_historical(vec![140.0, 160.0, 175.0]),
//!     HoldingInput::new("MSFT", 5.0, 300.0, 320.0).with_beta(0.9),
//! ];
//!
//! let analysis = analyze_portfolio(&holdings);
//! println!("Risk level: {}", analysis.metrics.risk_level);
//! for rec in &analysis.recommendations {
//!     println!("{:?}: {}", rec.kind, rec.message);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod feed;
pub mod portfolio;
pub mod recommendations;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{analyze_portfolio, RiskEngine};
pub use portfolio::volatility;
pub use types::{
    ApiResponse, HoldingAnalysis, HoldingInput, PortfolioAnalysis, PortfolioMetrics,
    Recommendation, RecommendationKind, RiskLevel, UnweightedHolding,
};

/// Error types for portfolio-risk-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Market data unavailable for {symbol}: {message}")]
    MarketData { symbol: String, message: String },
}

/// Result type for portfolio-risk-core operations.
pub type Result<T> = std::result::Result<T, Error>;
