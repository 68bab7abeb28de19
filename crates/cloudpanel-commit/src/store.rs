//! In-memory canonical store and store subscriptions

use crate::port::{CanonicalStore, StoreEvent};
use cloudpanel_draft::Resource;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const EVENT_CAPACITY: usize = 64;

/// Canonical entities kept in memory, keyed by id
///
/// Stands in for the list stores fed by backend sync. Entities are replaced
/// wholesale, never mutated in place.
pub struct MemoryStore<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl<T: Resource> MemoryStore<T> {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Insert or replace an entity and notify subscribers
    pub fn put(&self, entity: T) -> Arc<T> {
        let id = entity.id().to_string();
        let entity = Arc::new(entity);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::clone(&entity));
        tracing::debug!("Store updated {} {}", T::KIND, id);
        self.notify(StoreEvent::Changed(id));
        entity
    }

    /// Replace the whole content of the store
    pub fn reload(&self, entities: impl IntoIterator<Item = T>) {
        let entries = entities
            .into_iter()
            .map(|e| (e.id().to_string(), Arc::new(e)))
            .collect();
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries;
        self.notify(StoreEvent::Reloaded);
    }

    pub fn remove(&self, id: &str) -> Option<Arc<T>> {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            self.notify(StoreEvent::Removed(id.to_string()));
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<T: Resource> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> CanonicalStore<T> for MemoryStore<T> {
    fn get(&self, id: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn changes(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

/// Guard for a store listener
///
/// Dropping the guard stops the listener, so the subscription ends on every
/// exit path of the owning view.
pub struct StoreSubscription {
    listener: JoinHandle<()>,
}

impl StoreSubscription {
    pub(crate) fn new(listener: JoinHandle<()>) -> Self {
        Self { listener }
    }

    pub fn is_active(&self) -> bool {
        !self.listener.is_finished()
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
