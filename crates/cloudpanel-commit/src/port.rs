//! Ports to the collaborators outside the console core

use crate::error::Result;
use async_trait::async_trait;
use cloudpanel_draft::Resource;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Remote API for one resource type
///
/// Implementations wrap the HTTP client. Both calls may take arbitrarily
/// long; the controller keeps its editor disabled until they resolve.
#[async_trait]
pub trait ResourceApi<T: Resource>: Send + Sync {
    /// Upsert `entity`, returning the server-confirmed value
    async fn commit(&self, entity: T) -> Result<T>;

    /// Delete the resource with `id`
    async fn remove(&self, id: &str) -> Result<()>;
}

/// Change notification broadcast by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Entity with this id was inserted or replaced
    Changed(String),
    /// Entity with this id left the store
    Removed(String),
    /// Whole store was resynchronized
    Reloaded,
}

impl StoreEvent {
    /// Whether a listener on `id` has to refresh
    pub fn concerns(&self, id: &str) -> bool {
        match self {
            StoreEvent::Changed(changed) | StoreEvent::Removed(changed) => changed == id,
            StoreEvent::Reloaded => true,
        }
    }
}

/// Read port onto the store holding canonical entities
pub trait CanonicalStore<T: Resource>: Send + Sync {
    /// Current canonical snapshot, if the store knows the entity
    fn get(&self, id: &str) -> Option<Arc<T>>;

    /// Subscribe to change events
    fn changes(&self) -> broadcast::Receiver<StoreEvent>;
}
