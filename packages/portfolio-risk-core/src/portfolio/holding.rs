//! Per-holding metrics.

use super::risk::volatility_with;
use crate::config::EngineConfig;
use crate::types::{HoldingInput, UnweightedHolding};

/// Derive value, gain/loss, return and volatility for one holding.
///
/// Never fails: a zero cost basis, missing history or a non-positive first
/// close all degrade to 0 for the affected figure. The historical series is
/// taken as already ordered oldest first.
pub fn analyze_holding(input: &HoldingInput, config: &EngineConfig) -> UnweightedHolding {
    let current_value = input.quantity * input.current_price;
    let cost = input.quantity * input.buy_price;
    let gain_loss = current_value - cost;
    let gain_loss_pct = if cost > 0.0 {
        (gain_loss / cost) * 100.0
    } else {
        0.0
    };

    let return_1y = match input.historical.first() {
        Some(&start) if start > 0.0 => ((input.current_price - start) / start) * 100.0,
        _ => 0.0,
    };

    UnweightedHolding {
        symbol: input.symbol.trim().to_uppercase(),
        quantity: input.quantity,
        buy_price: input.buy_price,
        current_price: input.current_price,
        current_value,
        cost,
        gain_loss,
        gain_loss_pct,
        return_1y,
        volatility: volatility_with(&input.historical, config.trading_days_per_year),
        beta: input.effective_beta(),
        history_points: input.historical.len(),
    }
}
