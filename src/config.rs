//! Dashboard configuration
//!
//! Defaults come from `constants`; override individual values with the
//! `with_*` builders.

use crate::{
    chart::ChartStyle,
    constants::{
        COINGECKO_API_URL, FAVORITES_STORAGE_KEY, HISTORY_DAYS, REQUEST_TIMEOUT_SECS,
    },
    error::ProviderError,
    providers::CoinGeckoProvider,
    types::Currency,
};
use std::time::Duration;

/// Settings for a `Dashboard` and its CoinGecko provider
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CoinGecko API base URL
    pub api_base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Currency selected at startup
    pub default_currency: Currency,
    /// Days of history loaded for the chart
    pub history_days: u32,
    /// Storage key for the favorites array
    pub storage_key: String,
    /// Price line styling
    pub chart_style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: COINGECKO_API_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            default_currency: Currency::default(),
            history_days: HISTORY_DAYS,
            storage_key: FAVORITES_STORAGE_KEY.to_string(),
            chart_style: ChartStyle::default(),
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the startup currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Set how many days of history the chart shows.
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days.max(1);
        self
    }

    /// Set the favorites storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the chart styling.
    pub fn with_chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = style;
        self
    }

    /// Builds a CoinGecko provider from the API settings
    pub fn coingecko_provider(&self) -> Result<CoinGeckoProvider, ProviderError> {
        CoinGeckoProvider::with_base_url(&self.api_base_url, self.request_timeout)
    }
}
