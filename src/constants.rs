//! Constants for the crypto market dashboard
//!
//! All defaults live here. There is no config file and no environment
//! lookup; callers that need different values build a `DashboardConfig`.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko endpoint for the ranked market list
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// Sort order requested from the markets endpoint
pub const MARKETS_ORDER: &str = "market_cap_desc";

/// Number of assets requested per catalog refresh (single fixed page)
pub const MARKETS_PER_PAGE: u32 = 100;

/// Days of price history shown in the chart
pub const HISTORY_DAYS: u32 = 7;

/// HTTP request timeout (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-dashboard-sdk/0.1.0";

/// Storage key holding the JSON array of favorite ids
pub const FAVORITES_STORAGE_KEY: &str = "cryptoFavorites";

/// Currency selected when nothing else is chosen
pub const DEFAULT_CURRENCY: &str = "usd";

/// Currencies offered by the demo's currency selector
pub const SUPPORTED_CURRENCIES: &[&str] = &["usd", "eur", "gbp", "jpy"];

/// Message queued when the market list cannot be loaded
pub const MARKETS_FAILED_MESSAGE: &str =
    "Failed to load cryptocurrency data. Please try again later.";

/// Message queued when a favorites change could not be written to storage
pub const FAVORITES_NOT_SAVED_MESSAGE: &str =
    "Favorites could not be saved and will be lost on restart.";

/// Placeholder shown in the favorites panel when nothing is favorited
pub const NO_FAVORITES_MESSAGE: &str = "No favorites added yet";

/// Toggle button label for a favorited row
pub const REMOVE_FAVORITE_LABEL: &str = "Remove";

/// Toggle button label for a row that is not favorited
pub const ADD_FAVORITE_LABEL: &str = "Add to Favorites";
