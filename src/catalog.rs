//! Latest fetched asset catalog

use crate::types::AssetSnapshot;
use std::sync::Arc;

/// Ordered list of asset snapshots, as ranked by the API
///
/// The list sits behind an `Arc` and is swapped whole on `replace`, so a
/// reader holding a `snapshot()` never sees a half-updated catalog.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Arc<Vec<AssetSnapshot>>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog holding `assets` in the given order
    pub fn from_assets(assets: Vec<AssetSnapshot>) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }

    /// Swaps in a freshly fetched list
    pub fn replace(&mut self, assets: Vec<AssetSnapshot>) {
        self.assets = Arc::new(assets);
    }

    /// Assets whose name or symbol contains `term`, ignoring case
    ///
    /// An empty term returns the whole catalog. Order is preserved.
    pub fn filter(&self, term: &str) -> Vec<&AssetSnapshot> {
        if term.is_empty() {
            return self.assets.iter().collect();
        }

        let needle = term.to_lowercase();
        self.assets
            .iter()
            .filter(|asset| asset.matches_lowercase(&needle))
            .collect()
    }

    pub fn all(&self) -> &[AssetSnapshot] {
        &self.assets
    }

    /// Shared handle to the current list
    pub fn snapshot(&self) -> Arc<Vec<AssetSnapshot>> {
        Arc::clone(&self.assets)
    }

    pub fn get(&self, id: &str) -> Option<&AssetSnapshot> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    /// Top-ranked asset
    pub fn first(&self) -> Option<&AssetSnapshot> {
        self.assets.first()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn asset(id: &str, name: &str, symbol: &str) -> AssetSnapshot {
        AssetSnapshot::new(id, name, symbol, dec!(1), dec!(1))
    }

    fn sample() -> AssetCatalog {
        AssetCatalog::from_assets(vec![
            asset("bitcoin", "Bitcoin", "btc"),
            asset("ethereum", "Ethereum", "eth"),
            asset("tether", "Tether", "usdt"),
            asset("wrapped-bitcoin", "Wrapped Bitcoin", "wbtc"),
        ])
    }

    fn ids(assets: &[&AssetSnapshot]) -> Vec<String> {
        assets.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let catalog = sample();
        assert_eq!(
            ids(&catalog.filter("")),
            vec!["bitcoin", "ethereum", "tether", "wrapped-bitcoin"]
        );
    }

    #[test]
    fn test_filter_is_case_insensitive_on_name_and_symbol() {
        let catalog = sample();
        assert_eq!(ids(&catalog.filter("BITCOIN")), vec!["bitcoin", "wrapped-bitcoin"]);
        assert_eq!(ids(&catalog.filter("Usd")), vec!["tether"]);
        assert_eq!(ids(&catalog.filter("eth")), vec!["ethereum"]);
        assert!(catalog.filter("doge").is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let catalog = sample();
        let before = catalog.all().to_vec();
        let _ = catalog.filter("eth");
        assert_eq!(catalog.all(), before.as_slice());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut catalog = sample();
        let old = catalog.snapshot();

        catalog.replace(vec![asset("solana", "Solana", "sol")]);

        assert_eq!(old.len(), 4);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().unwrap().id, "solana");
        assert!(catalog.get("bitcoin").is_none());
    }
}
