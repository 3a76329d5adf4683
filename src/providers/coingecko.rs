//! CoinGecko market data provider implementation

use crate::{
    constants::{
        COINGECKO_API_URL, COINGECKO_MARKETS_ENDPOINT, MARKETS_ORDER, MARKETS_PER_PAGE,
        REQUEST_TIMEOUT_SECS, USER_AGENT,
    },
    error::ProviderError,
    provider::MarketDataSource,
    types::{AssetSnapshot, Currency, PricePoint},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// One entry of the `/coins/markets` response
#[derive(Debug, Deserialize)]
struct CoinGeckoMarket {
    id: String,
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<Decimal>,
    #[serde(default)]
    market_cap: Option<Decimal>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    price_change_percentage_24h: Option<Decimal>,
}

impl From<CoinGeckoMarket> for AssetSnapshot {
    fn from(market: CoinGeckoMarket) -> Self {
        Self {
            id: market.id,
            name: market.name,
            symbol: market.symbol,
            current_price: market.current_price.unwrap_or_default(),
            price_change_percentage_24h: market.price_change_percentage_24h,
            market_cap: market.market_cap.unwrap_or_default(),
            image_url: market.image.unwrap_or_default(),
            market_cap_rank: market.market_cap_rank,
        }
    }
}

/// `/coins/{id}/market_chart` response; only prices are used
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// CoinGecko market data provider
pub struct CoinGeckoProvider {
    client: Client,
    base_url: Url,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider against the public API
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(COINGECKO_API_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a provider against another base URL (proxy or pro endpoint)
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base path; each segment is percent-encoded
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Builds the ranked market list URL
    fn markets_url(&self, currency: &Currency) -> Url {
        let mut url = self.endpoint(
            COINGECKO_MARKETS_ENDPOINT
                .split('/')
                .filter(|segment| !segment.is_empty()),
        );
        url.query_pairs_mut()
            .append_pair("vs_currency", currency.code())
            .append_pair("order", MARKETS_ORDER)
            .append_pair("per_page", &MARKETS_PER_PAGE.to_string())
            .append_pair("page", "1")
            .append_pair("sparkline", "false");
        url
    }

    /// Builds the price history URL for one asset
    ///
    /// The id is a single path segment, so `/`, `?` and `#` in it are escaped.
    fn history_url(&self, asset_id: &str, currency: &Currency, days: u32) -> Url {
        let mut url = self.endpoint(["coins", asset_id, "market_chart"]);
        url.query_pairs_mut()
            .append_pair("vs_currency", currency.code())
            .append_pair("days", &days.to_string());
        url
    }

    /// Performs a GET and returns the body of a successful response
    async fn get_text(&self, url: Url) -> Result<String, ProviderError> {
        tracing::debug!(url = %url, "Requesting CoinGecko");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::NetworkError(e)
            }
        })?;

        // Check for rate limiting
        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        // Check for other errors
        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response.text().await.map_err(ProviderError::NetworkError)
    }
}

/// Parses a `/coins/markets` body, keeping API order
pub(crate) fn parse_markets(body: &str) -> Result<Vec<AssetSnapshot>, ProviderError> {
    let markets: Vec<CoinGeckoMarket> = serde_json::from_str(body).map_err(|e| {
        ProviderError::InvalidResponse(format!("Failed to parse CoinGecko markets: {}", e))
    })?;

    Ok(markets.into_iter().map(AssetSnapshot::from).collect())
}

/// Parses a `/coins/{id}/market_chart` body into price points
pub(crate) fn parse_history(body: &str) -> Result<Vec<PricePoint>, ProviderError> {
    let chart: MarketChartResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::InvalidResponse(format!("Failed to parse CoinGecko market chart: {}", e))
    })?;

    Ok(chart
        .prices
        .into_iter()
        .map(|(timestamp, price)| PricePoint::new(timestamp as i64, price))
        .collect())
}

#[async_trait]
impl MarketDataSource for CoinGeckoProvider {
    async fn fetch_markets(&self, currency: &Currency) -> Result<Vec<AssetSnapshot>, ProviderError> {
        let body = self.get_text(self.markets_url(currency)).await?;
        let assets = parse_markets(&body)?;

        tracing::debug!(
            count = assets.len(),
            currency = currency.code(),
            "Fetched markets from CoinGecko"
        );

        Ok(assets)
    }

    async fn fetch_history(
        &self,
        asset_id: &str,
        currency: &Currency,
        days: u32,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let body = self
            .get_text(self.history_url(asset_id, currency, days))
            .await?;
        let points = parse_history(&body)?;

        tracing::debug!(
            asset_id,
            count = points.len(),
            "Fetched price history from CoinGecko"
        );

        Ok(points)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_markets_url() {
        let provider = CoinGeckoProvider::new().unwrap();
        let eur = Currency::new("eur").unwrap();
        assert_eq!(
            provider.markets_url(&eur).as_str(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=eur&order=market_cap_desc&per_page=100&page=1&sparkline=false"
        );
    }

    #[test]
    fn test_history_url_trims_base() {
        let provider =
            CoinGeckoProvider::with_base_url("http://localhost:8080/api/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            provider.history_url("bitcoin", &Currency::usd(), 7).as_str(),
            "http://localhost:8080/api/coins/bitcoin/market_chart?vs_currency=usd&days=7"
        );
    }

    #[test]
    fn test_history_url_escapes_asset_id() {
        let provider = CoinGeckoProvider::new().unwrap();
        let url = provider.history_url("foo?days=365", &Currency::usd(), 7);
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/foo%3Fdays=365/market_chart?vs_currency=usd&days=7"
        );
        assert_eq!(url.query_pairs().count(), 2);

        let url = provider.history_url("../markets", &Currency::usd(), 7);
        assert_eq!(
            url.path_segments().unwrap().collect::<Vec<_>>(),
            vec!["api", "v3", "coins", "..%2Fmarkets", "market_chart"]
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            CoinGeckoProvider::with_base_url("not a url", Duration::from_secs(1)),
            Err(ProviderError::InvalidUrl(_))
        ));
        assert!(matches!(
            CoinGeckoProvider::with_base_url("mailto:someone@example.com", Duration::from_secs(1)),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_markets() {
        let body = r#"[
            {"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"https://img/btc.png",
             "current_price":50000.5,"market_cap":1000000000000,"market_cap_rank":1,
             "price_change_percentage_24h":2.5,"total_volume":123},
            {"id":"odd","symbol":"odd","name":"Odd","image":null,
             "current_price":null,"market_cap":null,"market_cap_rank":null,
             "price_change_percentage_24h":null}
        ]"#;

        let assets = parse_markets(body).unwrap();
        assert_eq!(assets.len(), 2);

        assert_eq!(assets[0].id, "bitcoin");
        assert_eq!(assets[0].current_price, dec!(50000.5));
        assert_eq!(assets[0].market_cap, dec!(1000000000000));
        assert_eq!(assets[0].price_change_percentage_24h, Some(dec!(2.5)));
        assert_eq!(assets[0].image_url, "https://img/btc.png");
        assert_eq!(assets[0].market_cap_rank, Some(1));

        assert_eq!(assets[1].current_price, Decimal::ZERO);
        assert_eq!(assets[1].price_change_percentage_24h, None);
        assert_eq!(assets[1].image_url, "");
    }

    #[test]
    fn test_parse_markets_rejects_error_object() {
        let body = r#"{"status":{"error_code":429,"error_message":"throttled"}}"#;
        assert!(matches!(
            parse_markets(body),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_history() {
        let body = r#"{"prices":[[1704153600000,42000.1],[1704157200000.0,42100.2]],
                      "market_caps":[],"total_volumes":[]}"#;
        let points = parse_history(body).unwrap();
        assert_eq!(
            points,
            vec![
                PricePoint::new(1_704_153_600_000, 42000.1),
                PricePoint::new(1_704_157_200_000, 42100.2),
            ]
        );

        assert!(parse_history("[]").is_err());
    }
}
