//! cloudpanel commit reconciliation
//!
//! Drives a [`DraftEntity`](cloudpanel_draft::DraftEntity) against the remote
//! API and the canonical store.
//!
//! # Architecture
//!
//! ```text
//!   editor ──set/cancel/commit──▶ CommitController<T, A>
//!                                   │            │
//!                         A: ResourceApi<T>   ScheduledTask (settle, message)
//!                                   │            │
//!                                   ▼            ▼
//!                               server      watch::Sender<DraftEntity<T>>
//!                                   │            ▲
//!                                   ▼            │ ReplaceCanonical
//!                          CanonicalStore<T> ────┘ (StoreSubscription)
//! ```
//!
//! A successful commit stores the server-confirmed value as the canonical
//! snapshot, so a settled editor never falls back to stale data. Later store
//! pushes replace it as usual.

pub mod controller;
pub mod error;
pub mod port;
pub mod schedule;
pub mod store;

// Re-exports
pub use controller::{CommitController, CommitOutcome, RemoveOutcome};
pub use error::{CommitError, Result};
pub use port::{CanonicalStore, ResourceApi, StoreEvent};
pub use schedule::{ScheduledTask, TaskKind};
pub use store::{MemoryStore, StoreSubscription};
