//! Engine tuning parameters.
//!
//! Every threshold and scaling factor used by the engine lives here. The
//! defaults are fixed heuristics; a TOML file may override any subset.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Trading days used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Weighted volatility (%) to risk score multiplier.
pub const RISK_SCORE_MULTIPLIER: f64 = 2.0;
/// Upper bound of the risk score.
pub const RISK_SCORE_CAP: f64 = 100.0;
/// Risk score strictly above this is at least `Medio`.
pub const MEDIUM_RISK_THRESHOLD: f64 = 30.0;
/// Risk score strictly above this is `Alto`.
pub const HIGH_RISK_THRESHOLD: f64 = 60.0;
/// Weight strictly above this triggers a concentration warning.
pub const CONCENTRATION_WEIGHT_THRESHOLD: f64 = 0.40;
/// Gain/loss percentage strictly below this triggers a loss alert.
pub const LOSS_ALERT_THRESHOLD_PCT: f64 = -20.0;
/// Diversification score strictly below this triggers a suggestion.
pub const DIVERSIFICATION_FLOOR: f64 = 40.0;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "PORTFOLIO_RISK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trading_days_per_year: f64,
    pub risk_score_multiplier: f64,
    pub risk_score_cap: f64,
    pub medium_risk_threshold: f64,
    pub high_risk_threshold: f64,
    pub concentration_weight_threshold: f64,
    pub loss_alert_threshold_pct: f64,
    pub diversification_floor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            risk_score_multiplier: RISK_SCORE_MULTIPLIER,
            risk_score_cap: RISK_SCORE_CAP,
            medium_risk_threshold: MEDIUM_RISK_THRESHOLD,
            high_risk_threshold: HIGH_RISK_THRESHOLD,
            concentration_weight_threshold: CONCENTRATION_WEIGHT_THRESHOLD,
            loss_alert_threshold_pct: LOSS_ALERT_THRESHOLD_PCT,
            diversification_floor: DIVERSIFICATION_FLOOR,
        }
    }
}

impl EngineConfig {
    /// Get the default config file path.
    ///
    /// Default path: `<config dir>/portfolio-risk/config.toml`
    /// Can be overridden with `PORTFOLIO_RISK_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("", "", "portfolio-risk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("portfolio-risk.toml"))
    }

    /// Load from the default path, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the engine's guards or tiers.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("trading_days_per_year", self.trading_days_per_year),
            ("risk_score_multiplier", self.risk_score_multiplier),
            ("risk_score_cap", self.risk_score_cap),
            ("medium_risk_threshold", self.medium_risk_threshold),
            ("high_risk_threshold", self.high_risk_threshold),
            ("concentration_weight_threshold", self.concentration_weight_threshold),
            ("loss_alert_threshold_pct", self.loss_alert_threshold_pct),
            ("diversification_floor", self.diversification_floor),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if self.trading_days_per_year <= 0.0 {
            return Err(Error::InvalidConfig(
                "trading_days_per_year must be positive".to_string(),
            ));
        }
        if self.risk_score_multiplier < 0.0 {
            return Err(Error::InvalidConfig(
                "risk_score_multiplier must not be negative".to_string(),
            ));
        }
        if self.risk_score_cap <= 0.0 {
            return Err(Error::InvalidConfig(
                "risk_score_cap must be positive".to_string(),
            ));
        }
        if self.high_risk_threshold <= self.medium_risk_threshold {
            return Err(Error::InvalidConfig(format!(
                "high_risk_threshold ({}) must exceed medium_risk_threshold ({})",
                self.high_risk_threshold, self.medium_risk_threshold
            )));
        }
        Ok(())
    }
}
