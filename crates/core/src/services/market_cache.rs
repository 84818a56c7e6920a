use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::warn;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::downsample::downsample;
use crate::models::market::{MarketSnapshot, MarketTable};
use crate::providers::traits::MarketDataProvider;

/// Process-wide cache of downsampled 24h market snapshots with a
/// 60-second freshness window.
///
/// Unlike the spot-price cache, symbols are fetched independently and
/// concurrently, and a failed fetch degrades that one symbol to an
/// empty snapshot instead of failing the batch. There is no per-symbol
/// fetch lock: overlapping refreshes of the same stale symbol may both
/// hit the provider, last write wins.
pub struct MarketSeriesCache {
    provider: Arc<dyn MarketDataProvider>,
    table: Mutex<MarketTable>,
}

impl MarketSeriesCache {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            table: Mutex::new(MarketTable::new()),
        }
    }

    /// Resolve 24h snapshots for a set of lowercase symbols.
    ///
    /// Duplicates are collapsed. The result has exactly one entry per
    /// requested symbol; symbols whose fetch failed get
    /// [`MarketSnapshot::default`] (empty series, zero change). Failures
    /// are not cached, so the next resolution retries.
    pub async fn resolve(&self, symbols: &[String]) -> HashMap<String, MarketSnapshot> {
        self.resolve_at(Utc::now(), symbols).await
    }

    async fn resolve_at(
        &self,
        now: DateTime<Utc>,
        symbols: &[String],
    ) -> HashMap<String, MarketSnapshot> {
        let mut requested: Vec<String> = Vec::new();
        for symbol in symbols {
            if !requested.contains(symbol) {
                requested.push(symbol.clone());
            }
        }

        let tasks = requested
            .iter()
            .map(|symbol| self.resolve_one(now, symbol));
        join_all(tasks).await.into_iter().collect()
    }

    async fn resolve_one(&self, now: DateTime<Utc>, symbol: &str) -> (String, MarketSnapshot) {
        {
            let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(snapshot) = table.fresh_snapshot(symbol, now) {
                return (symbol.to_string(), snapshot);
            }
        }

        match self.provider.day_history(symbol).await {
            Ok(points) => {
                let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
                let snapshot = downsample(&prices);
                let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
                table.insert(symbol, snapshot.clone(), now);
                (symbol.to_string(), snapshot)
            }
            Err(e) => {
                warn!("24h history fetch failed for {symbol}: {e}");
                (symbol.to_string(), MarketSnapshot::default())
            }
        }
    }

    /// Seed or overwrite a cache entry directly (pre-warming, tests).
    pub fn insert_snapshot(&self, symbol: &str, snapshot: MarketSnapshot, fetched_at: DateTime<Utc>) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.insert(symbol, snapshot, fetched_at);
    }

    /// Number of cached snapshots, fresh or stale.
    pub fn len(&self) -> usize {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
