use crate::dedupe::remove_duplicates_by_imdb_id;
use crate::error::PersistError;
use crate::persist::{load_list, save_list};
use movie_search_config::{keys, LocalStore};
use movie_search_models::SearchResult;
use std::sync::Arc;
use tracing::info;

/// Favorite titles, unique by identifier, mirrored to the local store
pub struct Favorites {
    store: Arc<dyn LocalStore>,
    items: Vec<SearchResult>,
}

impl Favorites {
    /// Restore favorites saved by a previous session
    pub fn load(store: Arc<dyn LocalStore>) -> Self {
        let stored: Vec<SearchResult> = load_list(store.as_ref(), keys::FAVORITES);
        let before = stored.len();
        let items = remove_duplicates_by_imdb_id(stored);
        if items.len() != before {
            info!("Dropped {} duplicate favorites from storage", before - items.len());
        }
        Self { store, items }
    }

    pub fn items(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|item| item.imdb_id == imdb_id)
    }

    /// Add the title if absent, remove it if present. Returns whether it is now a favorite.
    pub fn toggle(&mut self, item: &SearchResult) -> Result<bool, PersistError> {
        let now_favorite = if self.contains(&item.imdb_id) {
            self.items.retain(|fav| fav.imdb_id != item.imdb_id);
            false
        } else {
            self.items.push(item.clone());
            true
        };
        save_list(self.store.as_ref(), keys::FAVORITES, &self.items)?;
        Ok(now_favorite)
    }

    /// Remove by identifier; returns false when it was not a favorite
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool, PersistError> {
        let before = self.items.len();
        self.items.retain(|fav| fav.imdb_id != imdb_id);
        if self.items.len() == before {
            return Ok(false);
        }
        save_list(self.store.as_ref(), keys::FAVORITES, &self.items)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_search_config::MemoryStore;
    use movie_search_models::MediaKind;

    fn result(id: &str) -> SearchResult {
        SearchResult {
            imdb_id: id.to_string(),
            title: format!("Title {}", id),
            year: "2010".to_string(),
            poster: None,
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn test_double_toggle_restores_original() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());
        favorites.toggle(&result("tt1")).unwrap();
        let original: Vec<String> = favorites.items().iter().map(|f| f.imdb_id.clone()).collect();

        assert!(favorites.toggle(&result("tt2")).unwrap());
        assert!(!favorites.toggle(&result("tt2")).unwrap());

        let after: Vec<String> = favorites.items().iter().map(|f| f.imdb_id.clone()).collect();
        assert_eq!(original, after);
    }

    #[test]
    fn test_persisted_on_every_mutation() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());
        favorites.toggle(&result("tt1")).unwrap();
        favorites.toggle(&result("tt2")).unwrap();

        let restored = Favorites::load(store.clone());
        assert_eq!(restored.len(), 2);
        assert!(restored.contains("tt2"));

        favorites.remove("tt1").unwrap();
        let restored = Favorites::load(store);
        assert_eq!(restored.len(), 1);
        assert!(!restored.contains("tt1"));
    }

    #[test]
    fn test_duplicates_in_storage_are_collapsed() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        save_list(store.as_ref(), keys::FAVORITES, &[result("tt1"), result("tt1"), result("tt2")]).unwrap();

        let favorites = Favorites::load(store);
        let ids: Vec<&str> = favorites.items().iter().map(|f| f.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store);
        assert!(!favorites.remove("tt404").unwrap());
        assert!(favorites.is_empty());
    }
}
