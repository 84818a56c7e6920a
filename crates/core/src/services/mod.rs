pub mod downsample;
pub mod market_cache;
pub mod portfolio_service;
pub mod price_cache;
