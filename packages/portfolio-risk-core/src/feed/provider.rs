//! Market data provider abstraction.

use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Inclusive date range for historical closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The 365 days ending at `to`.
    pub fn trailing_year(to: NaiveDate) -> Self {
        Self {
            from: to - Duration::days(365),
            to,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Everything the engine needs about one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarketSnapshot {
    /// Latest price
    pub price: f64,
    /// Company profile beta, if known
    pub beta: Option<f64>,
    /// Daily closes, oldest first
    pub historical: Vec<f64>,
}

/// Source of quotes, profiles and daily closes.
///
/// Implementations must return closes ordered oldest first; the engine does
/// not sort them.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Current price for a symbol.
    async fn quote(&self, symbol: &str) -> Result<f64>;

    /// Beta from the company profile. `Ok(None)` if the profile has none.
    async fn beta(&self, symbol: &str) -> Result<Option<f64>>;

    /// Daily closes within `range`, oldest first.
    async fn daily_closes(&self, symbol: &str, range: DateRange) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Default)]
struct StaticEntry {
    price: Option<f64>,
    beta: Option<f64>,
    closes: Vec<(NaiveDate, f64)>,
}

/// In-memory provider backed by fixed data.
///
/// Useful for offline runs and tests. Symbols are matched case-insensitively;
/// unknown symbols fail every call.
#[derive(Debug, Default)]
pub struct StaticProvider {
    entries: HashMap<String, StaticEntry>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, price: f64) -> Self {
        self.entry(symbol).price = Some(price);
        self
    }

    pub fn with_beta(mut self, symbol: &str, beta: f64) -> Self {
        self.entry(symbol).beta = Some(beta);
        self
    }

    /// Add dated closes. Stored sorted by date regardless of input order.
    pub fn with_closes(mut self, symbol: &str, closes: Vec<(NaiveDate, f64)>) -> Self {
        let entry = self.entry(symbol);
        entry.closes = closes;
        entry.closes.sort_by_key(|(date, _)| *date);
        self
    }

    /// Total number of provider calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn entry(&mut self, symbol: &str) -> &mut StaticEntry {
        self.entries.entry(symbol.to_uppercase()).or_default()
    }

    fn lookup(&self, symbol: &str) -> Result<&StaticEntry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(&symbol.to_uppercase())
            .ok_or_else(|| Error::MarketData {
                symbol: symbol.to_string(),
                message: "unknown symbol".to_string(),
            })
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    fn provider_name(&self) -> &'static str {
        "static"
    }

    async fn quote(&self, symbol: &str) -> Result<f64> {
        self.lookup(symbol)?.price.ok_or_else(|| Error::MarketData {
            symbol: symbol.to_string(),
            message: "no quote".to_string(),
        })
    }

    async fn beta(&self, symbol: &str) -> Result<Option<f64>> {
        Ok(self.lookup(symbol)?.beta)
    }

    async fn daily_closes(&self, symbol: &str, range: DateRange) -> Result<Vec<f64>> {
        Ok(self
            .lookup(symbol)?
            .closes
            .iter()
            .filter(|(date, _)| range.contains(*date))
            .map(|(_, close)| *close)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_year() {
        let range = DateRange::trailing_year(date(2025, 6, 30));
        assert_eq!(range.from, date(2024, 6, 30));
        assert!(range.contains(date(2025, 1, 1)));
        assert!(!range.contains(date(2024, 6, 29)));
    }

    #[tokio::test]
    async fn test_static_provider_sorts_and_filters() {
        let provider = StaticProvider::new().with_quote("aapl", 120.0).with_closes(
            "AAPL",
            vec![
                (date(2025, 1, 3), 103.0),
                (date(2023, 1, 1), 50.0),
                (date(2025, 1, 2), 102.0),
            ],
        );

        let range = DateRange::new(date(2025, 1, 1), date(2025, 12, 31));
        let closes = provider.daily_closes("AAPL", range).await.unwrap();
        assert_eq!(closes, vec![102.0, 103.0]);
        assert_eq!(provider.quote("Aapl").await.unwrap(), 120.0);
        assert_eq!(provider.beta("AAPL").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_static_provider_unknown_symbol() {
        let provider = StaticProvider::new();
        let result = provider.quote("NOPE").await;
        assert!(matches!(result, Err(Error::MarketData { .. })));
        assert_eq!(provider.call_count(), 1);
    }
}
