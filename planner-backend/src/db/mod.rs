//! Durable string-keyed storage for serialized collections.

pub mod memory_store;
pub mod sqlite;

pub use memory_store::MemoryStore;
pub use sqlite::Database;

/// A local string-keyed store holding one serialized value per key.
///
/// Writes replace the previous value for a key in full.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}
