//! NoteStore: meeting notes and memos

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::{new_record_id, ChangeKind, Collection, CollectionKind, StoreEvent};
use crate::db::KeyValueStore;
use crate::error::StoreError;
use crate::models::{Note, NoteDraft};
use crate::{persistence, views};

pub struct NoteStore {
    inner: Collection<Note>,
}

impl NoteStore {
    /// Load the notes under `key`; starts empty when nothing usable is stored
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let notes = persistence::load_collection(storage.as_ref(), &key, Vec::new);
        Self {
            inner: Collection::new(CollectionKind::Notes, notes, storage, key),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.inner.items
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.inner.items.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.inner.version
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }

    /// Case-insensitive search over title and content
    pub fn search(&self, query: &str) -> Vec<&Note> {
        views::search_notes(&self.inner.items, query)
    }

    /// Create a note stamped with the current time
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note, StoreError> {
        let note = draft.into_note(new_record_id(), Utc::now())?;
        log::info!("[NOTES] Created '{}' ({})", note.title, note.id);

        self.inner.items.push(note.clone());
        self.inner.commit(ChangeKind::Created, &note.id)?;
        Ok(note)
    }

    /// Replace title and content; id and `created_at` are kept
    pub fn update(&mut self, id: &str, draft: NoteDraft) -> Result<Option<Note>, StoreError> {
        let Some(slot) = self.inner.items.iter_mut().find(|n| n.id == id) else {
            log::debug!("[NOTES] Update for unknown id {} ignored", id);
            return Ok(None);
        };

        let updated = draft.into_note(slot.id.clone(), slot.created_at)?;
        *slot = updated.clone();

        log::info!("[NOTES] Updated '{}' ({})", updated.title, id);
        self.inner.commit(ChangeKind::Updated, id)?;
        Ok(Some(updated))
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.inner.items.len();
        self.inner.items.retain(|n| n.id != id);
        if self.inner.items.len() == before {
            log::debug!("[NOTES] Delete for unknown id {} ignored", id);
            return Ok(false);
        }

        log::info!("[NOTES] Deleted {}", id);
        self.inner.commit(ChangeKind::Deleted, id)?;
        Ok(true)
    }
}
