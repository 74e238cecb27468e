//! Owned record collections with persistence and change notification.
//!
//! Each store holds its collection in memory, writes the whole collection to
//! the key-value store after every committed mutation, and broadcasts a
//! [`StoreEvent`] so views can recompute.

pub mod content_store;
pub mod note_store;

pub use content_store::ContentStore;
pub use note_store::NoteStore;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::db::KeyValueStore;
use crate::error::StoreError;
use crate::persistence;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Content,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Emitted after a mutation has been applied in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub collection: CollectionKind,
    pub change: ChangeKind,
    pub id: String,
    /// Store version after the change
    pub version: u64,
}

/// Generate a new record id
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Shared state behind both stores
struct Collection<T> {
    kind: CollectionKind,
    items: Vec<T>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    version: u64,
    events: broadcast::Sender<StoreEvent>,
}

impl<T: Serialize> Collection<T> {
    fn new(kind: CollectionKind, items: Vec<T>, storage: Arc<dyn KeyValueStore>, key: String) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            kind,
            items,
            storage,
            key,
            version: 0,
            events,
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Bump the version, notify subscribers, then write the full collection.
    ///
    /// The in-memory change stays applied even when the write fails.
    fn commit(&mut self, change: ChangeKind, id: &str) -> Result<(), StoreError> {
        self.version += 1;

        // No receivers is fine
        let _ = self.events.send(StoreEvent {
            collection: self.kind,
            change,
            id: id.to_string(),
            version: self.version,
        });

        persistence::save_collection(self.storage.as_ref(), &self.key, &self.items)
            .map_err(StoreError::Persistence)
    }
}
