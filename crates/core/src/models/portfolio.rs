use serde::{Deserialize, Serialize};

/// One row of the valuation report: an aggregated position in a single
/// asset, with its current price, value, and short-term market history.
///
/// Derived per request from holdings plus the caches — never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    /// Display symbol, uppercased (e.g., "BITCOIN" for id "bitcoin").
    pub symbol: String,

    /// Canonical lowercase asset id — the cache/provider key.
    pub id: String,

    /// Total units held, summed across the owner's holding records.
    pub amount: f64,

    /// Unit price in the quote currency. 0 when the provider knows nothing
    /// about the asset.
    pub price: f64,

    /// amount × price.
    pub value: f64,

    /// Downsampled 24h price series (≤ 30 points, oldest first).
    pub series: Vec<f64>,

    /// Percent change between the first and last series samples.
    pub change: f64,
}

/// The full valuation report: all rows plus their summed value.
///
/// Row order follows the first appearance of each symbol among the
/// owner's holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total: f64,
    pub rows: Vec<PortfolioRow>,
}
