//! Load and save whole collections under a fixed storage key.
//!
//! Loading never fails: a missing, unreadable or malformed value yields the
//! supplied default. Saving always writes the full collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::KeyValueStore;

/// Load the collection stored under `key`, or `default()` if there is none
/// or it cannot be decoded.
pub fn load_collection<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("[STORAGE] No saved value for '{}', using defaults", key);
            return default();
        }
        Err(e) => {
            log::warn!("[STORAGE] Failed to read '{}': {}. Using defaults.", key, e);
            return default();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            log::info!("[STORAGE] Loaded {} records from '{}'", items.len(), key);
            items
        }
        Err(e) => {
            log::warn!("[STORAGE] Malformed data under '{}': {}. Using defaults.", key, e);
            default()
        }
    }
}

/// Serialize the full collection and write it under `key`
pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), String> {
    let json = serde_json::to_string(items).map_err(|e| {
        log::error!("[STORAGE] Failed to serialize {} records for '{}': {}", items.len(), key, e);
        format!("Failed to serialize '{}': {}", key, e)
    })?;

    store.set_item(key, &json).map_err(|e| {
        log::error!("[STORAGE] Failed to save {} records to '{}': {}", items.len(), key, e);
        e
    })
}
