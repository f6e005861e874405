//! Market data plumbing that feeds the engine.
//!
//! The engine itself is pure; this module gathers quotes, betas and price
//! history per symbol concurrently and turns them into [`HoldingInput`]s.
//! A failing fetch never aborts the batch: the affected field gets a neutral
//! placeholder the engine already tolerates.
//!
//! [`HoldingInput`]: crate::types::HoldingInput

mod assemble;
mod cache;
mod provider;

pub use assemble::{assemble_holdings, fetch_snapshot, PositionRecord};
pub use cache::{MarketCache, MemoryCache, NoCache};
pub use provider::{DateRange, MarketDataProvider, MarketSnapshot, StaticProvider};
