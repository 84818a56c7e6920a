use std::collections::HashMap;
use std::sync::Arc;

use super::market_cache::MarketSeriesCache;
use super::price_cache::SpotPriceCache;
use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::portfolio::{PortfolioRow, PortfolioSummary};

/// Merges an owner's holdings with cached market data into portfolio
/// rows and a grand total.
///
/// Holds both caches; everything else about a request (who owns the
/// holdings, where they came from) is the facade's business.
pub struct PortfolioService {
    prices: Arc<SpotPriceCache>,
    market: Arc<MarketSeriesCache>,
}

impl PortfolioService {
    pub fn new(prices: Arc<SpotPriceCache>, market: Arc<MarketSeriesCache>) -> Self {
        Self { prices, market }
    }

    /// Build the valuation report for a set of holdings.
    ///
    /// 1. Sum amounts per lowercased symbol; row order follows the first
    ///    appearance of each symbol.
    /// 2. Empty holdings short-circuit to an empty summary — the caches
    ///    are never called.
    /// 3. Both caches resolve concurrently; a spot-price failure fails
    ///    the whole aggregation (no partial totals).
    /// 4. Symbols absent from a cache result fall back to price 0 /
    ///    empty series.
    pub async fn aggregate(&self, holdings: &[Holding]) -> Result<PortfolioSummary, CoreError> {
        let mut amounts: HashMap<String, f64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for holding in holdings {
            let id = holding.symbol.to_lowercase();
            if !amounts.contains_key(&id) {
                order.push(id.clone());
            }
            *amounts.entry(id).or_insert(0.0) += holding.amount;
        }

        if order.is_empty() {
            return Ok(PortfolioSummary::default());
        }

        let (prices, market) =
            futures::join!(self.prices.resolve(&order), self.market.resolve(&order));
        let prices = prices?;

        let rows: Vec<PortfolioRow> = order
            .into_iter()
            .map(|id| {
                let amount = amounts.get(&id).copied().unwrap_or(0.0);
                let price = prices.get(&id).copied().unwrap_or(0.0);
                let snapshot = market.get(&id).cloned().unwrap_or_default();
                PortfolioRow {
                    symbol: id.to_uppercase(),
                    id,
                    amount,
                    price,
                    value: amount * price,
                    series: snapshot.series,
                    change: snapshot.change_pct,
                }
            })
            .collect();

        let total = rows.iter().map(|r| r.value).sum();
        Ok(PortfolioSummary { total, rows })
    }

    /// Validate and normalize input for the add-holding command.
    ///
    /// Returns the trimmed, lowercased symbol. Rules: symbol length 2–40
    /// after normalization; amount a finite positive number. Violations
    /// are rejected here, before any cache or repository access.
    pub fn validate_new_holding(&self, symbol: &str, amount: f64) -> Result<String, CoreError> {
        let symbol = symbol.trim().to_lowercase();
        if symbol.len() < 2 || symbol.len() > 40 {
            return Err(CoreError::ValidationError(format!(
                "Symbol must be 2-40 characters, got {} ({symbol:?})",
                symbol.len()
            )));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {amount}"
            )));
        }
        Ok(symbol)
    }
}
