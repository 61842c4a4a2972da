//! In-process item store.
//!
//! Keeps items in insertion order. `save` replaces an existing item in place
//! and appends new ones.

use crate::model::agenda::{AgendaId, Identified};
use crate::repo::item_store::{ItemStore, RepoError, RepoResult};
use log::warn;
use std::sync::RwLock;

/// Volatile store backed by a lock-guarded vector.
#[derive(Debug, Default)]
pub struct MemoryItemStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryItemStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Seeds the store; later `save` calls keep upsert semantics.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T: Identified + Clone> ItemStore<T> for MemoryItemStore<T> {
    fn find_all(&self) -> Vec<T> {
        match self.items.read() {
            Ok(items) => items.clone(),
            Err(_) => {
                warn!("event=store_read module=repo status=degraded backend=memory error=poisoned");
                Vec::new()
            }
        }
    }

    fn find_by_id(&self, id: AgendaId) -> Option<T> {
        self.find_all()
            .into_iter()
            .find(|item| item.agenda_id() == id)
    }

    fn save(&self, item: &T) -> RepoResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepoError::Unavailable("memory store lock poisoned".to_string()))?;
        match items
            .iter_mut()
            .find(|existing| existing.agenda_id() == item.agenda_id())
        {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    fn delete_by_id(&self, id: AgendaId) -> RepoResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepoError::Unavailable("memory store lock poisoned".to_string()))?;
        items.retain(|item| item.agenda_id() != id);
        Ok(())
    }

    fn max_id(&self) -> RepoResult<Option<AgendaId>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepoError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(items.iter().map(Identified::agenda_id).max())
    }
}
