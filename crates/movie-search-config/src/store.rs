use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Keys of the values the client persists between sessions
pub mod keys {
    /// Raw string
    pub const LAST_SEARCH_TERM: &str = "lastSearchTerm";
    /// JSON array of search results
    pub const FAVORITES: &str = "movieFavorites";
    /// JSON array of history entries
    pub const WATCH_HISTORY: &str = "watchHistory";
    /// Raw string, "dark" or "light"
    pub const THEME: &str = "theme";
    /// JSON array of search results
    pub const COMPARE_LIST: &str = "compareList";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode state: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Local key-value storage (string keys, string values)
///
/// Mutations are persisted before they return. Calls are synchronous and run
/// on async worker threads, so implementations should stay cheap (a small
/// local file at most).
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Vec<String>;
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct StateData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store backed by a flat TOML map on disk
pub struct FileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store, loading existing values if the file exists
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let state: StateData = toml::from_str(&content)?;
            debug!("Loaded {} stored values from {}", state.data.len(), path.display());
            state.data
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let state = StateData { data: values.clone() };
        let content = toml::to_string_pretty(&state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = lock(&self.values);
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = lock(&self.values);
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.values).keys().cloned().collect()
    }
}

/// Non-persistent store, for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        lock(&self.values).insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.values).remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.values).keys().cloned().collect()
    }
}
