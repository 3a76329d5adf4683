//! Error types for the crypto market dashboard

use thiserror::Error;

/// Errors that can occur when fetching data from a market data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,

    /// Base URL cannot be used to build request URLs
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing data could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an Unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Errors surfaced by the dashboard controller
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Loading market data failed
    #[error("Market data unavailable: {0}")]
    MarketData(#[from] ProviderError),

    /// A newer request was issued before this one resolved; its response was dropped
    #[error("Request {generation} superseded by a newer request")]
    Superseded { generation: u64 },

    /// Currency code is not a plain alphabetic code
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),
}

impl DashboardError {
    /// Creates a Superseded error
    pub fn superseded(generation: u64) -> Self {
        Self::Superseded { generation }
    }

    /// True when the error only means a newer request took precedence
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
