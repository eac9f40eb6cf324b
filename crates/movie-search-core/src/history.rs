use crate::error::PersistError;
use crate::persist::{load_list, save_list};
use chrono::{DateTime, Utc};
use movie_search_config::{keys, LocalStore};
use movie_search_models::{HistoryEntry, MovieDetails};
use std::sync::Arc;

/// Recently viewed titles, newest first, capped at `limit` and unique by identifier
pub struct WatchHistory {
    store: Arc<dyn LocalStore>,
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl WatchHistory {
    pub fn load(store: Arc<dyn LocalStore>, limit: usize) -> Self {
        let stored: Vec<HistoryEntry> = load_list(store.as_ref(), keys::WATCH_HISTORY);
        let mut entries: Vec<HistoryEntry> = Vec::with_capacity(stored.len().min(limit));
        for entry in stored {
            if entries.len() >= limit {
                break;
            }
            if !entries.iter().any(|e| e.imdb_id == entry.imdb_id) {
                entries.push(entry);
            }
        }
        Self { store, entries, limit }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put the title at the front, replacing an earlier view of it
    pub fn record(&mut self, details: &MovieDetails, viewed_at: DateTime<Utc>) -> Result<(), PersistError> {
        let mut next = Vec::with_capacity(self.limit);
        next.push(HistoryEntry::from_details(details, viewed_at));
        next.extend(
            self.entries
                .iter()
                .filter(|e| e.imdb_id != details.imdb_id)
                .cloned(),
        );
        next.truncate(self.limit);

        self.entries = next;
        save_list(self.store.as_ref(), keys::WATCH_HISTORY, &self.entries)
    }

    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.entries.clear();
        save_list(self.store.as_ref(), keys::WATCH_HISTORY, &self.entries)
    }
}
