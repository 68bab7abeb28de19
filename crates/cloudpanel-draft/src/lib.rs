//! cloudpanel draft state
//!
//! Local editing model shared by every resource detail editor in the
//! console.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │   SelectionRow  (collapsed / expanded detail)    │
//! └─────────────────┬───────────────────────────────┘
//!                   │ owns while expanded
//! ┌─────────────────▼───────────────────────────────┐
//! │               DraftEntity<T>                     │
//! │  canonical: Arc<T>   snapshot: Option<T>         │
//! │  reduce(state, DraftAction) -> state             │
//! │  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ OrderedField<T>  │  │   TagField<T>    │      │
//! │  └──────────────────┘  └──────────────────┘      │
//! └─────────────────┬───────────────────────────────┘
//!                   │ T: Resource
//! ┌─────────────────▼───────────────────────────────┐
//! │ Firewall, Disk, Device, Organization, ...        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! While a draft exists, canonical updates pushed by the store are recorded
//! but never shown: unsaved edits always win until they are committed and
//! settled, or cancelled.

pub mod draft;
pub mod error;
pub mod model;
pub mod resource;
pub mod row;
pub mod sublist;

// Re-exports
pub use draft::{CommitPhase, CommitState, DraftAction, DraftEntity, Operation, reduce};
pub use error::{DraftError, Result};
pub use resource::{Resource, ResourceKind};
pub use row::{ClickOrigin, RowClick, RowEvent, SelectionRow};
pub use sublist::{OrderedField, OrderedSublistEditor, TagField, TagListEditor};
