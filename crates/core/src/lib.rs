pub mod auth;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use auth::IdentityProvider;
use errors::CoreError;
use models::holding::AddHoldingOutcome;
use models::portfolio::PortfolioSummary;
use providers::traits::MarketDataProvider;
use services::market_cache::MarketSeriesCache;
use services::portfolio_service::PortfolioService;
use services::price_cache::SpotPriceCache;
use storage::traits::HoldingsRepository;

/// Main entry point for the Coinfolio core library.
///
/// Owns the two market caches and the aggregator, and wires them to the
/// external collaborators (holdings repository, identity provider,
/// market-data provider). One instance is shared across all concurrent
/// requests; the caches live as long as the process.
#[must_use]
pub struct Coinfolio {
    repository: Arc<dyn HoldingsRepository>,
    identity: Arc<dyn IdentityProvider>,
    prices: Arc<SpotPriceCache>,
    market: Arc<MarketSeriesCache>,
    portfolio_service: PortfolioService,
}

impl std::fmt::Debug for Coinfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coinfolio")
            .field("cached_prices", &self.prices.len())
            .field("cached_snapshots", &self.market.len())
            .finish()
    }
}

impl Coinfolio {
    pub fn new(
        repository: Arc<dyn HoldingsRepository>,
        identity: Arc<dyn IdentityProvider>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        let prices = Arc::new(SpotPriceCache::new(provider.clone()));
        let market = Arc::new(MarketSeriesCache::new(provider));
        let portfolio_service = PortfolioService::new(prices.clone(), market.clone());
        Self {
            repository,
            identity,
            prices,
            market,
            portfolio_service,
        }
    }

    // ── Query surface ───────────────────────────────────────────────

    /// Current valuation of the authenticated owner's portfolio:
    /// per-symbol rows plus the summed total.
    pub async fn portfolio(&self, session_token: &str) -> Result<PortfolioSummary, CoreError> {
        let owner_id = self.identity.authenticate(session_token).await?;
        let holdings = self.repository.list_holdings(owner_id).await?;
        self.portfolio_service.aggregate(&holdings).await
    }

    // ── Command surface ─────────────────────────────────────────────

    /// Record a new holding for the authenticated owner.
    ///
    /// Input is validated before any repository access; an account record
    /// missing for a valid session yields `UnknownOwner` rather than an
    /// error.
    pub async fn add_holding(
        &self,
        session_token: &str,
        symbol: &str,
        amount: f64,
    ) -> Result<AddHoldingOutcome, CoreError> {
        let owner_id = self.identity.authenticate(session_token).await?;
        let symbol = self
            .portfolio_service
            .validate_new_holding(symbol, amount)?;

        if self.repository.find_owner(owner_id).await?.is_none() {
            return Ok(AddHoldingOutcome::UnknownOwner);
        }

        self.repository
            .create_holding(owner_id, &symbol, amount)
            .await?;
        Ok(AddHoldingOutcome::Created)
    }

    // ── Caches ──────────────────────────────────────────────────────

    /// The shared spot-price cache (pre-warming, inspection).
    pub fn price_cache(&self) -> &SpotPriceCache {
        &self.prices
    }

    /// The shared 24h market cache (pre-warming, inspection).
    pub fn market_cache(&self) -> &MarketSeriesCache {
        &self.market
    }
}
