use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::market::SeriesPoint;

/// Trait abstraction for the remote market-data source.
///
/// The caches and the aggregator only see this seam; swapping the real
/// API (or injecting a mock in tests) touches nothing else.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest unit price for each asset id, in the quote currency.
    ///
    /// Ids the provider does not know are simply absent from the returned
    /// map — callers decide how to fill the gap.
    async fn batch_spot_prices(&self, ids: &[String]) -> Result<HashMap<String, f64>, CoreError>;

    /// Raw price history for one asset id over the last 24 hours,
    /// oldest sample first.
    async fn day_history(&self, id: &str) -> Result<Vec<SeriesPoint>, CoreError>;
}
