//! Dashboard controller
//!
//! Owns the application state (catalog, favorites, selected currency, search
//! term, chart) and turns front-end events into state changes followed by a
//! fresh render.
//!
//! ## Request sequencing
//!
//! Market and history fetches run without holding the state lock, so two
//! refreshes can overlap (e.g. the user switches currency twice quickly).
//! Each request takes a generation number; a response is only applied if no
//! newer request of the same kind was issued meanwhile. Stale responses are
//! dropped and reported as `DashboardError::Superseded`.
//!
//! The selected currency only changes once a catalog priced in it has been
//! applied, so the rendered view never labels old prices with a new symbol.

use crate::{
    catalog::AssetCatalog,
    chart::{ChartPresenter, ChartSeries},
    config::DashboardConfig,
    constants::{FAVORITES_NOT_SAVED_MESSAGE, MARKETS_FAILED_MESSAGE},
    error::DashboardError,
    provider::MarketDataSource,
    render::{render_view, RenderedView},
    storage::KeyValueStorage,
    store::{FavoritesStore, Toggle},
    types::{AssetSnapshot, Currency, Notification},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// User actions a front end forwards to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Search box contents changed
    SearchChanged(String),
    /// Currency selector changed
    CurrencyChanged(Currency),
    /// Favorite button clicked on a row
    FavoriteToggled(String),
    /// Asset picked for the price chart
    AssetSelected(String),
    /// Reload the catalog for the current currency
    Refresh,
}

struct DashboardState {
    catalog: AssetCatalog,
    favorites: FavoritesStore,
    currency: Currency,
    search: String,
    chart: Option<ChartSeries>,
    notifications: Vec<Notification>,
}

/// Top-level controller for the market dashboard
///
/// # Example
/// ```no_run
/// use crypto_dashboard_sdk::{Dashboard, DashboardConfig, DashboardEvent, JsonFileStorage};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DashboardConfig::default();
/// let provider = Arc::new(config.coingecko_provider()?);
/// let storage = Arc::new(JsonFileStorage::new("dashboard.json"));
/// let dashboard = Dashboard::new(provider, storage, config);
///
/// let view = dashboard.init().await?;
/// println!("{}", view);
///
/// let view = dashboard
///     .handle(DashboardEvent::FavoriteToggled("bitcoin".to_string()))
///     .await?;
/// println!("{}", view);
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    source: Arc<dyn MarketDataSource>,
    state: RwLock<DashboardState>,
    presenter: ChartPresenter,
    history_days: u32,
    catalog_generation: AtomicU64,
    chart_generation: AtomicU64,
}

impl Dashboard {
    /// Creates a dashboard with an empty catalog and favorites restored from `storage`
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        storage: Arc<dyn KeyValueStorage>,
        config: DashboardConfig,
    ) -> Self {
        let favorites = FavoritesStore::load_with_key(storage, &config.storage_key);

        Self {
            source,
            state: RwLock::new(DashboardState {
                catalog: AssetCatalog::new(),
                favorites,
                currency: config.default_currency,
                search: String::new(),
                chart: None,
                notifications: Vec::new(),
            }),
            presenter: ChartPresenter::with_style(config.chart_style),
            history_days: config.history_days,
            catalog_generation: AtomicU64::new(0),
            chart_generation: AtomicU64::new(0),
        }
    }

    /// Loads the first catalog and chart, returning the initial view
    pub async fn init(&self) -> Result<RenderedView, DashboardError> {
        tracing::info!(
            provider = self.source.provider_name(),
            "Initializing market dashboard"
        );
        self.refresh().await
    }

    /// Dispatches one front-end event and returns the re-rendered view
    pub async fn handle(&self, event: DashboardEvent) -> Result<RenderedView, DashboardError> {
        match event {
            DashboardEvent::SearchChanged(term) => Ok(self.set_search(&term).await),
            DashboardEvent::CurrencyChanged(currency) => self.set_currency(currency).await,
            DashboardEvent::FavoriteToggled(id) => {
                self.toggle_favorite(&id).await;
                Ok(self.view().await)
            }
            DashboardEvent::AssetSelected(id) => {
                self.load_chart(&id).await;
                Ok(self.view().await)
            }
            DashboardEvent::Refresh => self.refresh().await,
        }
    }

    /// Re-fetches the catalog for the current currency
    pub async fn refresh(&self) -> Result<RenderedView, DashboardError> {
        let (generation, currency) = {
            let state = self.state.read().await;
            (self.next_catalog_generation(), state.currency.clone())
        };
        self.load_catalog(generation, currency).await
    }

    /// Reloads the catalog in `currency` and makes it the selected currency
    ///
    /// On failure the previous currency stays selected along with the
    /// previous catalog.
    pub async fn set_currency(&self, currency: Currency) -> Result<RenderedView, DashboardError> {
        let generation = self.next_catalog_generation();

        tracing::info!(currency = currency.code(), generation, "Currency changed");
        self.load_catalog(generation, currency).await
    }

    /// Updates the search term; no network access
    pub async fn set_search(&self, term: &str) -> RenderedView {
        let mut state = self.state.write().await;
        state.search = term.to_string();
        Self::render(&state)
    }

    /// Flips the favorite status of `id`
    ///
    /// A failed save keeps the change in memory and queues a warning.
    pub async fn toggle_favorite(&self, id: &str) -> Toggle {
        let mut state = self.state.write().await;
        let toggle = state.favorites.toggle(id);
        tracing::debug!(
            asset_id = id,
            favorited = toggle.favorited,
            persisted = toggle.persisted,
            "Favorite toggled"
        );
        if !toggle.persisted {
            state
                .notifications
                .push(Notification::warning(FAVORITES_NOT_SAVED_MESSAGE));
        }
        toggle
    }

    /// Loads the price history chart for `asset_id`
    ///
    /// Returns true if the chart was updated. Failures are logged and leave
    /// the current chart in place.
    pub async fn load_chart(&self, asset_id: &str) -> bool {
        let (generation, currency) = {
            let state = self.state.read().await;
            (
                self.chart_generation.fetch_add(1, Ordering::SeqCst) + 1,
                state.currency.clone(),
            )
        };

        let history = match self
            .source
            .fetch_history(asset_id, &currency, self.history_days)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(asset_id, error = %e, "Error loading chart data");
                return false;
            }
        };

        let mut state = self.state.write().await;
        if self.chart_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(asset_id, generation, "Dropping superseded chart response");
            return false;
        }

        state.chart = Some(self.presenter.present(asset_id, &currency, &history));
        true
    }

    /// Renders the current state
    pub async fn view(&self) -> RenderedView {
        let state = self.state.read().await;
        Self::render(&state)
    }

    pub async fn currency(&self) -> Currency {
        self.state.read().await.currency.clone()
    }

    pub async fn search_term(&self) -> String {
        self.state.read().await.search.clone()
    }

    /// Current chart, if one has loaded
    pub async fn chart(&self) -> Option<ChartSeries> {
        self.state.read().await.chart.clone()
    }

    /// Favorited ids
    pub async fn favorites(&self) -> Vec<String> {
        self.state.read().await.favorites.list()
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.state.read().await.favorites.contains(id)
    }

    /// Shared handle to the current catalog list
    pub async fn catalog(&self) -> Arc<Vec<AssetSnapshot>> {
        self.state.read().await.catalog.snapshot()
    }

    /// Drains pending user notifications
    pub async fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.state.write().await.notifications)
    }

    fn next_catalog_generation(&self) -> u64 {
        self.catalog_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current_catalog(&self, generation: u64) -> bool {
        self.catalog_generation.load(Ordering::SeqCst) == generation
    }

    fn render(state: &DashboardState) -> RenderedView {
        render_view(
            &state.catalog,
            &state.search,
            state.favorites.ids(),
            &state.currency,
        )
    }

    async fn load_catalog(
        &self,
        generation: u64,
        currency: Currency,
    ) -> Result<RenderedView, DashboardError> {
        let result = self.source.fetch_markets(&currency).await;

        let top_asset = {
            let mut state = self.state.write().await;
            if !self.is_current_catalog(generation) {
                tracing::debug!(
                    currency = currency.code(),
                    generation,
                    "Dropping superseded market response"
                );
                return Err(DashboardError::superseded(generation));
            }

            match result {
                Ok(assets) => {
                    tracing::info!(
                        count = assets.len(),
                        currency = currency.code(),
                        generation,
                        "Catalog refreshed"
                    );
                    state.catalog.replace(assets);
                    state.currency = currency.clone();
                    state.catalog.first().map(|asset| asset.id.clone())
                }
                Err(e) => {
                    tracing::error!(
                        currency = currency.code(),
                        error = %e,
                        "Error loading crypto data"
                    );
                    state
                        .notifications
                        .push(Notification::error(MARKETS_FAILED_MESSAGE));
                    return Err(e.into());
                }
            }
        };

        if let Some(asset_id) = top_asset {
            self.load_chart(&asset_id).await;
        }

        Ok(self.view().await)
    }
}
