//! Injected snapshot caches.

use super::provider::MarketSnapshot;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Key/value store for market snapshots.
pub trait MarketCache: Send + Sync {
    /// A live (non-expired) snapshot for `key`.
    fn get(&self, key: &str) -> Option<MarketSnapshot>;

    fn insert(&self, key: String, snapshot: MarketSnapshot);
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl MarketCache for NoCache {
    fn get(&self, _key: &str) -> Option<MarketSnapshot> {
        None
    }

    fn insert(&self, _key: String, _snapshot: MarketSnapshot) {}
}

/// Process-local cache with a fixed time-to-live per entry.
///
/// Expired entries are dropped when read and swept on every insert, so the
/// map never holds more than the entries inserted within one TTL window.
#[derive(Debug)]
pub struct MemoryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, MarketSnapshot)>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones not yet swept included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.lock().retain(|_, (inserted, _)| now.duration_since(*inserted) < ttl);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (Instant, MarketSnapshot)>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Market data cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl MarketCache for MemoryCache {
    fn get(&self, key: &str) -> Option<MarketSnapshot> {
        let mut entries = self.lock();
        let (inserted, snapshot) = entries.get(key)?;
        if inserted.elapsed() < self.ttl {
            return Some(snapshot.clone());
        }
        entries.remove(key);
        None
    }

    fn insert(&self, key: String, snapshot: MarketSnapshot) {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, (inserted, _)| now.duration_since(*inserted) < ttl);
        entries.insert(key, (now, snapshot));
    }
}
