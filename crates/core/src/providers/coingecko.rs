use async_trait::async_trait;
use chrono::DateTime;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::market::SeriesPoint;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// The single quote currency for all prices and valuations.
pub const QUOTE_CURRENCY: &str = "usd";

/// CoinGecko API provider for cryptocurrency market data.
///
/// - **Free**: No API key required for the public endpoints used here.
/// - **Endpoints**: `/simple/price` (batched spot prices),
///   `/coins/{id}/market_chart` (intraday history).
///
/// Note: CoinGecko is keyed by lowercase coin ids like "bitcoin",
/// "ethereum" — the same ids holdings are stored under.
pub struct CoinGeckoProvider {
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

/// `/simple/price` response: `{ "<id>": { "usd": 43000.12 }, … }`.
/// Ids unknown to CoinGecko are omitted from the object.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[ [timestamp_ms, price], … ]`, oldest first.
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn batch_spot_prices(&self, ids: &[String]) -> Result<HashMap<String, f64>, CoreError> {
        let url = format!("{BASE_URL}/simple/price");
        let ids_param = ids.join(",");
        debug!("fetching spot prices for {} id(s)", ids.len());

        let resp: SimplePriceResponse = self
            .client
            .get(&url)
            .query(&[("ids", ids_param.as_str()), ("vs_currencies", QUOTE_CURRENCY)])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse spot prices: {e}"),
            })?;

        Ok(resp
            .into_iter()
            .filter_map(|(id, quotes)| quotes.get(QUOTE_CURRENCY).map(|price| (id, *price)))
            .collect())
    }

    async fn day_history(&self, id: &str) -> Result<Vec<SeriesPoint>, CoreError> {
        let url = format!("{BASE_URL}/coins/{id}/market_chart");
        debug!("fetching 24h history for {id}");

        let resp: MarketChartResponse = self
            .client
            .get(&url)
            .query(&[("vs_currency", QUOTE_CURRENCY), ("days", "1")])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse history for {id}: {e}"),
            })?;

        let points: Vec<SeriesPoint> = resp
            .prices
            .iter()
            .filter_map(|&(ts_ms, price)| {
                let ts = DateTime::from_timestamp_millis(ts_ms as i64)?;
                Some(SeriesPoint { ts, price })
            })
            .collect();

        Ok(points)
    }
}
