//! ContentStore: the planned-post collection

use std::sync::Arc;
use tokio::sync::broadcast;

use super::{new_record_id, ChangeKind, Collection, CollectionKind, StoreEvent};
use crate::db::KeyValueStore;
use crate::error::StoreError;
use crate::models::{ContentDraft, ContentItem, PostStatus};
use crate::{persistence, seed};

pub struct ContentStore {
    inner: Collection<ContentItem>,
}

impl ContentStore {
    /// Load the collection under `key`, falling back to the seed content
    pub fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = persistence::load_collection(storage.as_ref(), &key, seed::initial_content);
        Self {
            inner: Collection::new(CollectionKind::Content, items, storage, key),
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.inner.items
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.inner.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Incremented on every committed mutation
    pub fn version(&self) -> u64 {
        self.inner.version
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }

    /// Validate the draft, assign a fresh id and append it
    pub fn create(&mut self, draft: ContentDraft) -> Result<ContentItem, StoreError> {
        let item = draft.into_item(new_record_id())?;
        log::info!("[CONTENT] Created '{}' ({}) for {}", item.title, item.id, item.post_date);

        self.inner.items.push(item.clone());
        self.inner.commit(ChangeKind::Created, &item.id)?;
        Ok(item)
    }

    /// Replace the item with matching `id`, keeping the id.
    ///
    /// Returns `Ok(None)` without touching storage if no such item exists.
    pub fn update(&mut self, id: &str, draft: ContentDraft) -> Result<Option<ContentItem>, StoreError> {
        let updated = draft.into_item(id.to_string())?;

        let Some(slot) = self.inner.items.iter_mut().find(|i| i.id == id) else {
            log::debug!("[CONTENT] Update for unknown id {} ignored", id);
            return Ok(None);
        };
        *slot = updated.clone();

        log::info!("[CONTENT] Updated '{}' ({})", updated.title, id);
        self.inner.commit(ChangeKind::Updated, id)?;
        Ok(Some(updated))
    }

    /// Move an item to any status. No transition rules apply.
    pub fn set_status(&mut self, id: &str, status: PostStatus) -> Result<Option<ContentItem>, StoreError> {
        let Some(item) = self.get(id) else {
            return Ok(None);
        };
        let mut draft = ContentDraft::from_item(item);
        draft.status = status;
        self.update(id, draft)
    }

    /// Remove the item with matching `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.inner.items.len();
        self.inner.items.retain(|i| i.id != id);
        if self.inner.items.len() == before {
            log::debug!("[CONTENT] Delete for unknown id {} ignored", id);
            return Ok(false);
        }

        log::info!("[CONTENT] Deleted {}", id);
        self.inner.commit(ChangeKind::Deleted, id)?;
        Ok(true)
    }
}
