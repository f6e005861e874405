//! Concurrent fan-out from stored positions to engine inputs.

use super::cache::MarketCache;
use super::provider::{DateRange, MarketDataProvider, MarketSnapshot};
use crate::types::HoldingInput;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// A stored position: what the user owns, without market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
}

impl PositionRecord {
    pub fn new(symbol: &str, quantity: f64, buy_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            quantity,
            buy_price,
        }
    }

    fn into_holding(self, snapshot: MarketSnapshot) -> HoldingInput {
        HoldingInput {
            symbol: self.symbol,
            quantity: self.quantity,
            buy_price: self.buy_price,
            current_price: snapshot.price,
            beta: snapshot.beta,
            historical: snapshot.historical,
        }
    }
}

fn cache_key(symbol: &str, range: DateRange) -> String {
    format!("{}:{}:{}", symbol.to_uppercase(), range.from, range.to)
}

/// Gather quote, beta and history for one symbol.
///
/// The three calls run concurrently. Each failure is replaced independently:
/// price by 0, beta by `None`, history by an empty series. Only snapshots
/// where every call succeeded are cached.
pub async fn fetch_snapshot<P, C>(
    provider: &P,
    cache: &C,
    symbol: &str,
    range: DateRange,
) -> MarketSnapshot
where
    P: MarketDataProvider + ?Sized,
    C: MarketCache + ?Sized,
{
    let key = cache_key(symbol, range);
    if let Some(snapshot) = cache.get(&key) {
        tracing::debug!(symbol, "Market data cache hit");
        return snapshot;
    }
    tracing::debug!(
        symbol,
        provider = provider.provider_name(),
        "Market data cache miss"
    );

    let (quote, beta, closes) = futures::join!(
        provider.quote(symbol),
        provider.beta(symbol),
        provider.daily_closes(symbol, range),
    );

    let mut complete = true;
    let price = quote.unwrap_or_else(|e| {
        tracing::warn!(symbol, error = %e, "Quote fetch failed, using 0");
        complete = false;
        0.0
    });
    let beta = beta.unwrap_or_else(|e| {
        tracing::warn!(symbol, error = %e, "Profile fetch failed, beta defaults to 1.0");
        complete = false;
        None
    });
    let historical = closes.unwrap_or_else(|e| {
        tracing::warn!(symbol, error = %e, "History fetch failed, using empty series");
        complete = false;
        Vec::new()
    });

    let snapshot = MarketSnapshot {
        price,
        beta,
        historical,
    };
    if complete {
        cache.insert(key, snapshot.clone());
    }
    snapshot
}

/// Build engine inputs for every position, fetching market data in parallel.
///
/// Output order matches `positions`. Returns only once every fetch has
/// settled, since weights need every holding's value.
pub async fn assemble_holdings<P, C>(
    provider: &P,
    cache: &C,
    positions: Vec<PositionRecord>,
    range: DateRange,
) -> Vec<HoldingInput>
where
    P: MarketDataProvider + ?Sized,
    C: MarketCache + ?Sized,
{
    let snapshots = join_all(
        positions
            .iter()
            .map(|p| fetch_snapshot(provider, cache, &p.symbol, range)),
    )
    .await;

    positions
        .into_iter()
        .zip(snapshots)
        .map(|(position, snapshot)| position.into_holding(snapshot))
        .collect()
}
