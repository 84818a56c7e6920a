use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::CoreError;
use crate::models::market::SpotPriceTable;
use crate::providers::traits::MarketDataProvider;

/// Process-wide spot-price cache with a 60-second freshness window.
///
/// Resolving a batch of symbols fetches only the stale/missing ones, in
/// exactly one upstream call, so concurrent valuation requests shield the
/// provider from redundant traffic. The table lives for the life of the
/// process; nothing is persisted.
pub struct SpotPriceCache {
    provider: Arc<dyn MarketDataProvider>,
    table: Mutex<SpotPriceTable>,
}

impl SpotPriceCache {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            table: Mutex::new(SpotPriceTable::new()),
        }
    }

    /// Resolve unit prices for a set of lowercase symbols.
    ///
    /// Duplicates are collapsed. The result has exactly one entry per
    /// requested symbol, value ≥ 0; symbols the provider omits (or
    /// returns garbage for) are priced at 0. An upstream failure fails
    /// the whole resolution — no partial results.
    pub async fn resolve(&self, symbols: &[String]) -> Result<HashMap<String, f64>, CoreError> {
        self.resolve_at(Utc::now(), symbols).await
    }

    async fn resolve_at(
        &self,
        now: DateTime<Utc>,
        symbols: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        let mut requested: Vec<String> = Vec::new();
        for symbol in symbols {
            if !requested.contains(symbol) {
                requested.push(symbol.clone());
            }
        }

        // Partition under the lock; the lock is never held across I/O.
        let stale: Vec<String> = {
            let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            requested
                .iter()
                .filter(|s| table.fresh_price(s, now).is_none())
                .cloned()
                .collect()
        };

        if !stale.is_empty() {
            debug!("refreshing {} spot price(s): {stale:?}", stale.len());
            let fetched = self.provider.batch_spot_prices(&stale).await?;

            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            for symbol in &stale {
                let price = fetched
                    .get(symbol)
                    .copied()
                    .filter(|p| p.is_finite() && *p >= 0.0)
                    .unwrap_or(0.0);
                table.insert(symbol.clone(), price, now);
            }
        }

        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        Ok(requested
            .into_iter()
            .map(|symbol| {
                let price = table.price(&symbol).unwrap_or(0.0);
                (symbol, price)
            })
            .collect())
    }

    /// Seed or overwrite a cache entry directly (pre-warming, tests).
    pub fn insert_quote(&self, symbol: &str, price: f64, fetched_at: DateTime<Utc>) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.insert(symbol, price, fetched_at);
    }

    /// Number of cached quotes, fresh or stale.
    pub fn len(&self) -> usize {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
