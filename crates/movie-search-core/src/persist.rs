use crate::error::PersistError;
use movie_search_config::LocalStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Load a JSON array stored under `key`
///
/// Missing keys are empty. Corrupt values are logged and treated as empty.
pub fn load_list<T>(store: &dyn LocalStore, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key) else {
        debug!("No stored value for {}", key);
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!("Restored {} items from {}", items.len(), key);
            items
        }
        Err(e) => {
            warn!("Stored value for {} is corrupt ({}), starting empty", key, e);
            Vec::new()
        }
    }
}

/// Replace the JSON array stored under `key`
pub fn save_list<T>(store: &dyn LocalStore, key: &'static str, items: &[T]) -> Result<(), PersistError>
where
    T: Serialize,
{
    let json = serde_json::to_string(items).map_err(|source| PersistError::Encode { key, source })?;
    store.set(key, json)?;
    debug!("Saved {} items to {}", items.len(), key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_search_config::MemoryStore;

    #[test]
    fn test_round_trip_and_corruption() {
        let store = MemoryStore::new();
        save_list(&store, "numbers", &[1u32, 2, 3]).unwrap();
        assert_eq!(load_list::<u32>(&store, "numbers"), vec![1, 2, 3]);

        store.set("numbers", "{not json".to_string()).unwrap();
        assert!(load_list::<u32>(&store, "numbers").is_empty());
        assert!(load_list::<u32>(&store, "absent").is_empty());
    }
}
