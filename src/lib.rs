//! # Crypto Market Dashboard SDK
//!
//! Core of a cryptocurrency market dashboard: fetches the top assets by
//! market cap from CoinGecko, filters them by name or symbol, tracks
//! favorites in persistent key-value storage and prepares 7-day price
//! history charts.
//!
//! The crate has no UI of its own. A front end (web, terminal, tests) sends
//! `DashboardEvent`s to a `Dashboard` and draws the `RenderedView` it gets
//! back.
//!
//! ## Usage
//!
//! ```no_run
//! use crypto_dashboard_sdk::{
//!     Currency, Dashboard, DashboardConfig, DashboardEvent, JsonFileStorage,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::default();
//! let provider = Arc::new(config.coingecko_provider()?);
//! let storage = Arc::new(JsonFileStorage::new("dashboard.json"));
//! let dashboard = Dashboard::new(provider, storage, config);
//!
//! dashboard.init().await?;
//! dashboard
//!     .handle(DashboardEvent::CurrencyChanged(Currency::new("eur")?))
//!     .await?;
//! let view = dashboard
//!     .handle(DashboardEvent::SearchChanged("bit".to_string()))
//!     .await?;
//! for row in &view.rows {
//!     println!("{} {} {}", row.name, row.price, row.change_24h);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Front end ──DashboardEvent──▶ Dashboard
//!                                 │
//!            ┌────────────────────┼──────────────────────┐
//!            ▼                    ▼                      ▼
//!    MarketDataSource       FavoritesStore          AssetCatalog
//!     (CoinGecko)         (KeyValueStorage)               │
//!            │                    └──────────┬───────────┘
//!            ▼                               ▼
//!     ChartPresenter                    render_view
//!            │                               │
//!            └──────────▶ Front end ◀────────┘
//! ```
//!
//! ## Error Handling
//!
//! A failed catalog load returns `DashboardError::MarketData` and queues a
//! `Notification` for the user; the previous catalog stays in place. Chart
//! failures are only logged. Favorites never fail to load: malformed stored
//! data counts as no favorites.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod provider;
pub mod providers;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use catalog::AssetCatalog;
pub use chart::{ChartPresenter, ChartSeries, ChartStyle};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardEvent};
pub use error::{DashboardError, ProviderError, StorageError};
pub use provider::MarketDataSource;
pub use providers::CoinGeckoProvider;
pub use render::{render_view, FavoritesPanel, RenderedView, TableRow, Trend};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use store::{FavoritesStore, Toggle};
pub use types::{AssetSnapshot, Currency, Notification, NotificationLevel, PricePoint};
