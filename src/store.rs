//! Persistent store of favorited asset ids

use crate::{constants::FAVORITES_STORAGE_KEY, error::StorageError, storage::KeyValueStorage};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    /// Membership after the toggle
    pub favorited: bool,

    /// False when the new set could not be written to storage
    pub persisted: bool,
}

/// Authoritative set of favorited asset ids
///
/// The in-memory set is the source of truth for the session. Every toggle
/// writes the full set back to storage before returning.
pub struct FavoritesStore {
    ids: BTreeSet<String>,
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl FavoritesStore {
    /// Restores favorites from `storage` under the default key
    ///
    /// Never fails: missing or malformed data yields an empty set.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::load_with_key(storage, FAVORITES_STORAGE_KEY)
    }

    /// Restores favorites from `storage` under `key`
    pub fn load_with_key(storage: Arc<dyn KeyValueStorage>, key: &str) -> Self {
        let ids = match storage.get(key) {
            Ok(Some(raw)) => parse_favorites(&raw),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Could not read favorites, starting empty");
                BTreeSet::new()
            }
        };

        tracing::debug!(key, count = ids.len(), "Loaded favorites");

        Self {
            ids,
            storage,
            key: key.to_string(),
        }
    }

    /// Checks whether `id` is favorited
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id` and persists the full set
    ///
    /// If the write fails the in-memory change is kept and
    /// `Toggle::persisted` is false.
    pub fn toggle(&mut self, id: &str) -> Toggle {
        let favorited = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };

        let persisted = match self.persist() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    asset_id = id,
                    favorited,
                    error = %e,
                    "Failed to persist favorites"
                );
                false
            }
        };

        Toggle {
            favorited,
            persisted,
        }
    }

    /// Favorited ids; order carries no meaning
    pub fn list(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Borrowed view of the favorited ids
    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let body = serde_json::to_string(&self.list())?;
        self.storage.set(&self.key, &body)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .field("key", &self.key)
            .finish()
    }
}

/// Decodes a persisted favorites array
///
/// Anything other than a JSON array gives an empty set. Non-string entries
/// are skipped and duplicates collapse.
fn parse_favorites(raw: &str) -> BTreeSet<String> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Persisted favorites are not valid JSON");
            return BTreeSet::new();
        }
    };

    match value {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => {
            tracing::debug!("Persisted favorites are not an array");
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{failing::FailingStorage, JsonFileStorage, MemoryStorage};
    use tempfile::tempdir;

    fn set_of(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn store_with(raw: &str) -> FavoritesStore {
        FavoritesStore::load(Arc::new(MemoryStorage::with_entry(FAVORITES_STORAGE_KEY, raw)))
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = FavoritesStore::load(Arc::new(MemoryStorage::new()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_dedupes_and_drops_non_strings() {
        let store = store_with(r#"["btc","btc","eth",42]"#);
        assert_eq!(store.ids(), &set_of(&["btc", "eth"]));
    }

    #[test]
    fn test_load_corrupted_inputs_never_fail() {
        for raw in ["not json", r#"{"btc": true}"#, "42", "null", r#"[1, 2, null, {}]"#, ""] {
            assert!(store_with(raw).is_empty(), "expected empty set for {:?}", raw);
        }
    }

    #[test]
    fn test_load_survives_storage_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = FavoritesStore::load(Arc::new(JsonFileStorage::new(&path)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_on_then_off() {
        let mut store = FavoritesStore::load(Arc::new(MemoryStorage::new()));

        let first = store.toggle("btc");
        assert!(first.favorited && first.persisted);
        assert_eq!(store.ids(), &set_of(&["btc"]));

        let second = store.toggle("btc");
        assert!(!second.favorited);
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_parity() {
        for initial in [false, true] {
            for count in 0..6 {
                let mut store = if initial {
                    store_with(r#"["sol"]"#)
                } else {
                    store_with("[]")
                };
                for _ in 0..count {
                    store.toggle("sol");
                }
                assert_eq!(store.contains("sol"), initial ^ (count % 2 == 1));
            }
        }
    }

    #[test]
    fn test_toggle_persists_before_returning() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = FavoritesStore::load(storage.clone());
        store.toggle("btc");
        store.toggle("eth");
        store.toggle("doge");
        store.toggle("eth");

        let reloaded = FavoritesStore::load(storage);
        assert_eq!(reloaded.ids(), &set_of(&["btc", "doge"]));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FavoritesStore::load(Arc::new(JsonFileStorage::new(&path)));
        store.toggle("bitcoin");
        store.toggle("ethereum");
        drop(store);

        let reloaded = FavoritesStore::load(Arc::new(JsonFileStorage::new(&path)));
        assert_eq!(reloaded.ids(), &set_of(&["bitcoin", "ethereum"]));
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = FavoritesStore::load(Arc::new(FailingStorage { initial: None }));

        let toggle = store.toggle("btc");
        assert!(toggle.favorited);
        assert!(!toggle.persisted);
        assert!(store.contains("btc"));
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let storage = Arc::new(MemoryStorage::with_entry(FAVORITES_STORAGE_KEY, r#"["btc"]"#));
        let mut other = FavoritesStore::load_with_key(storage.clone(), "otherFavorites");
        assert!(other.is_empty());

        other.toggle("eth");
        assert_eq!(FavoritesStore::load(storage).ids(), &set_of(&["btc"]));
    }
}
