use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::catalog::{model::SearchQuery, storage::KeyValueStore};

pub const STORAGE_KEY: &str = "spotify_search_queries";
pub const RECENT_LIMIT: usize = 5;

/// Recently searched queries, oldest first, mirrored to durable storage.
///
/// Persistence is best effort: read and write failures are logged and
/// otherwise ignored, a broken store simply behaves like an empty one.
pub struct SearchHistory {
    store: Arc<dyn KeyValueStore>,
    queries: watch::Sender<Vec<SearchQuery>>,
}

impl SearchHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let queries = Self::load(store.as_ref());
        let (queries, _) = watch::channel(queries);
        Self { store, queries }
    }

    pub fn record(&self, query: &str) {
        let entry = SearchQuery::new(query);
        if entry.query.is_empty() {
            return;
        }

        self.queries.send_modify(|queries| {
            queries.retain(|q| !q.matches(&entry.query));
            queries.push(entry);
        });

        self.save();
    }

    pub fn recent_five(&self) -> Vec<SearchQuery> {
        recent(&self.queries.borrow())
    }

    pub fn subscribe(&self) -> HistoryView {
        HistoryView {
            rx: self.queries.subscribe(),
        }
    }

    fn load(store: &dyn KeyValueStore) -> Vec<SearchQuery> {
        let stored = match store.get(STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read search history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SearchQuery>>(&stored) {
            Ok(queries) => {
                debug!("Loaded {} search history entries", queries.len());
                queries
            }
            Err(e) => {
                warn!("Discarding malformed search history: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self) {
        let serialized = match serde_json::to_string(&*self.queries.borrow()) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Failed to serialize search history: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(STORAGE_KEY, &serialized) {
            warn!("Failed to persist search history: {}", e);
        }
    }
}

/// Read-only subscription to the history. Dropping it unsubscribes.
pub struct HistoryView {
    rx: watch::Receiver<Vec<SearchQuery>>,
}

impl HistoryView {
    pub fn recent_five(&mut self) -> Vec<SearchQuery> {
        recent(&self.rx.borrow_and_update())
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

fn recent(queries: &[SearchQuery]) -> Vec<SearchQuery> {
    queries.iter().rev().take(RECENT_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::storage::{FileStore, MemoryStore, StorageError};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn texts(queries: &[SearchQuery]) -> Vec<&str> {
        queries.iter().map(|q| q.query.as_str()).collect()
    }

    #[test]
    fn test_record_deduplicates_case_insensitively() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));

        history.record("Daft Punk");
        history.record("Radiohead");
        history.record("daft punk");

        let recent = history.recent_five();
        assert_eq!(texts(&recent), vec!["daft punk", "Radiohead"]);
    }

    #[test]
    fn test_recent_five_caps_and_orders_most_recent_first() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));

        for query in ["a", "b", "c", "d", "e", "f", "g"] {
            history.record(query);
        }

        let recent = history.recent_five();
        assert_eq!(texts(&recent), vec!["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn test_record_trims_and_skips_blank() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));

        history.record("   ");
        history.record("  Air  ");

        assert_eq!(texts(&history.recent_five()), vec!["Air"]);
    }

    #[test]
    fn test_history_survives_restart() {
        let temp_dir = TempDir::new().unwrap();

        {
            let history = SearchHistory::new(Arc::new(FileStore::new(temp_dir.path())));
            history.record("Boards of Canada");
            history.record("Aphex Twin");
        }

        let history = SearchHistory::new(Arc::new(FileStore::new(temp_dir.path())));
        assert_eq!(
            texts(&history.recent_five()),
            vec!["Aphex Twin", "Boards of Canada"]
        );
    }

    #[test]
    fn test_persisted_format_is_query_and_timestamp() {
        let store = MemoryStore::new();
        let history = SearchHistory::new(Arc::new(store.clone()));

        history.record("Portishead");

        let raw = store.get(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value.as_array().unwrap()[0];
        assert_eq!(entry["query"], "Portishead");
        assert!(entry["timestamp"].is_string());
    }

    #[test]
    fn test_stored_timestamps_are_parsed_on_load() {
        let store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"[{"query":"x","timestamp":"2024-01-01T00:00:00.000Z"},{"query":"y","timestamp":"2024-03-15T12:30:45.250Z"}]"#,
            )
            .unwrap();

        let history = SearchHistory::new(Arc::new(store));
        let recent = history.recent_five();

        assert_eq!(texts(&recent), vec!["y", "x"]);
        assert_eq!(
            recent[1].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            recent[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 45).unwrap() + Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_malformed_storage_yields_empty_history() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();

        let history = SearchHistory::new(Arc::new(store));

        assert!(history.recent_five().is_empty());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let history = SearchHistory::new(Arc::new(BrokenStore));

        history.record("Massive Attack");

        assert_eq!(texts(&history.recent_five()), vec!["Massive Attack"]);
    }

    #[test]
    fn test_view_observes_new_entries() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));
        let mut view = history.subscribe();
        assert!(!view.has_changed());

        history.record("Björk");

        assert!(view.has_changed());
        assert_eq!(texts(&view.recent_five()), vec!["Björk"]);
        assert!(!view.has_changed());
    }
}
