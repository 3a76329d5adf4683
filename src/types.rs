//! Types for the crypto market dashboard

use crate::{constants::DEFAULT_CURRENCY, error::DashboardError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Quote currency used for prices and API requests (e.g. "usd")
///
/// Always stored lowercase, the form CoinGecko expects in `vs_currency`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parses a currency code, accepting any case
    pub fn new(code: &str) -> Result<Self, DashboardError> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DashboardError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// US dollar
    pub fn usd() -> Self {
        Self("usd".to_string())
    }

    /// Lowercase code as sent to the API
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Uppercase code for display (e.g. "USD")
    pub fn display_code(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }
}

impl FromStr for Currency {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time market data for one asset
///
/// Snapshots are never edited; a catalog refresh replaces all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Stable catalog key (e.g. "bitcoin")
    pub id: String,

    /// Display name (e.g. "Bitcoin")
    pub name: String,

    /// Ticker symbol as the API reports it (e.g. "btc")
    pub symbol: String,

    /// Current price in the selected currency
    pub current_price: Decimal,

    /// 24h price change percentage, absent for some assets
    pub price_change_percentage_24h: Option<Decimal>,

    /// Market capitalization in the selected currency
    pub market_cap: Decimal,

    /// Icon URL
    pub image_url: String,

    /// Market cap rank reported by the API
    pub market_cap_rank: Option<u32>,
}

impl AssetSnapshot {
    /// Create a snapshot with no 24h change, rank or image
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        current_price: Decimal,
        market_cap: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
            current_price,
            price_change_percentage_24h: None,
            market_cap,
            image_url: String::new(),
            market_cap_rank: None,
        }
    }

    /// Set the 24h change percentage
    pub fn with_change(mut self, change: Decimal) -> Self {
        self.price_change_percentage_24h = Some(change);
        self
    }

    /// Set the icon URL
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// True if `needle` (already lowercase) occurs in the name or symbol
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// One sample of an asset's price history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,

    /// Price in the selected currency
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }

    /// Timestamp as a UTC datetime, if representable
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Something was not saved; the session goes on
    Warning,
    /// Data could not be loaded
    Error,
}

/// Message queued for the front end to show the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification stamped now
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_normalizes_case() {
        let currency = Currency::new("EUR").unwrap();
        assert_eq!(currency.code(), "eur");
        assert_eq!(currency.display_code(), "EUR");
        assert_eq!(Currency::default(), Currency::usd());
    }

    #[test]
    fn test_currency_rejects_garbage() {
        assert!(Currency::new("").is_err());
        assert!(Currency::new("us d").is_err());
        assert!("u$d".parse::<Currency>().is_err());
    }

    #[test]
    fn test_snapshot_matches_name_or_symbol() {
        let btc = AssetSnapshot::new("bitcoin", "Bitcoin", "btc", dec!(50000), dec!(1000000000000));
        assert!(btc.matches_lowercase("bit"));
        assert!(btc.matches_lowercase("btc"));
        assert!(!btc.matches_lowercase("eth"));
    }

    #[test]
    fn test_notification_display() {
        assert_eq!(Notification::error("offline").to_string(), "[error] offline");
        let warning = Notification::warning("not saved");
        assert_eq!(warning.level, NotificationLevel::Warning);
        assert_eq!(warning.to_string(), "[warning] not saved");
    }

    #[test]
    fn test_price_point_time() {
        let point = PricePoint::new(1_700_000_000_000, 1.0);
        assert_eq!(point.time().unwrap().timestamp(), 1_700_000_000);
    }
}
