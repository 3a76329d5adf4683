//! Market data source abstraction for fetching catalogs and histories

use crate::{
    error::ProviderError,
    types::{AssetSnapshot, Currency, PricePoint},
};
use async_trait::async_trait;

/// Trait for market data sources
///
/// Implementations fetch the ranked asset list and per-asset price history
/// from a remote read-only API (CoinGecko, or a mock in tests).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches up to one page of assets ranked by market cap, descending
    ///
    /// # Arguments
    /// * `currency` - Quote currency for prices and market caps
    async fn fetch_markets(&self, currency: &Currency) -> Result<Vec<AssetSnapshot>, ProviderError>;

    /// Fetches the price history for one asset
    ///
    /// # Arguments
    /// * `asset_id` - Catalog id of the asset
    /// * `currency` - Quote currency for prices
    /// * `days` - How many days back to fetch
    async fn fetch_history(
        &self,
        asset_id: &str,
        currency: &Currency,
        days: u32,
    ) -> Result<Vec<PricePoint>, ProviderError>;

    /// Returns the name of this source
    fn provider_name(&self) -> &'static str;
}
