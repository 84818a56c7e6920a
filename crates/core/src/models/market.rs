use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Freshness window for cached spot prices, in seconds.
pub const PRICE_TTL_SECS: i64 = 60;

/// Freshness window for cached 24h market snapshots, in seconds.
pub const MARKET_TTL_SECS: i64 = 60;

/// A single raw sample of an asset's intraday price history, as returned
/// by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub ts: DateTime<Utc>,
    pub price: f64,
}

/// Downsampled 24-hour view of one asset: a bounded price series plus the
/// percent change between its first and last samples.
///
/// `Default` is the degraded form served when no market data is available:
/// empty series, zero change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub series: Vec<f64>,
    pub change_pct: f64,
}

/// A cached spot quote: last-known unit price in the quote currency plus
/// the time it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// A cached market snapshot with its fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEntry {
    pub snapshot: MarketSnapshot,
    pub fetched_at: DateTime<Utc>,
}

fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl_secs: i64) -> bool {
    now - fetched_at <= Duration::seconds(ttl_secs)
}

/// In-memory table of spot quotes per asset symbol.
///
/// Freshness checks take the current time as an argument so staleness is
/// testable without waiting out the window. Stale entries stay in the map
/// as overwritable slots; there is no eviction and no size bound.
#[derive(Debug, Clone, Default)]
pub struct SpotPriceTable {
    pub entries: HashMap<String, PriceQuote>,
}

impl SpotPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a quote's price if its age is within [`PRICE_TTL_SECS`].
    /// A stale entry is never served — callers must refresh it.
    pub fn fresh_price(&self, symbol: &str, now: DateTime<Utc>) -> Option<f64> {
        self.entries
            .get(symbol)
            .filter(|q| is_fresh(q.fetched_at, now, PRICE_TTL_SECS))
            .map(|q| q.price)
    }

    /// Get a quote's price regardless of age.
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.entries.get(symbol).map(|q| q.price)
    }

    /// Insert or overwrite a quote.
    pub fn insert(&mut self, symbol: impl Into<String>, price: f64, fetched_at: DateTime<Utc>) {
        self.entries
            .insert(symbol.into(), PriceQuote { price, fetched_at });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// In-memory table of 24h market snapshots per asset symbol.
/// Same freshness and lifetime rules as [`SpotPriceTable`].
#[derive(Debug, Clone, Default)]
pub struct MarketTable {
    pub entries: HashMap<String, MarketEntry>,
}

impl MarketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot if its age is within [`MARKET_TTL_SECS`].
    pub fn fresh_snapshot(&self, symbol: &str, now: DateTime<Utc>) -> Option<MarketSnapshot> {
        self.entries
            .get(symbol)
            .filter(|e| is_fresh(e.fetched_at, now, MARKET_TTL_SECS))
            .map(|e| e.snapshot.clone())
    }

    /// Insert or overwrite a snapshot.
    pub fn insert(
        &mut self,
        symbol: impl Into<String>,
        snapshot: MarketSnapshot,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries.insert(
            symbol.into(),
            MarketEntry {
                snapshot,
                fetched_at,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
