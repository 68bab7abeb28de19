//! Draft state and its reducer
//!
//! A [`DraftEntity`] pairs the canonical (server-confirmed) snapshot of a
//! resource with an optional local draft. Every change goes through
//! [`reduce`], a pure transition `(state, action) -> state`.
//!
//! ```text
//!            Set                    Commit
//!  canonical ─────▶ draft (gen N) ─────────▶ Committing{N}
//!      ▲                                     │        │
//!      │ SettleTimeout{N}, gen still N       ok       err
//!      └──────────────────────────── Saved{N}        Failed (draft kept)
//! ```

use crate::resource::Resource;
use std::sync::Arc;

/// Side operation bracketed by the disable guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Deleting the resource
    Remove,
    /// One-shot action such as a disk restore or a device test alert
    Action(String),
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Remove => write!(f, "remove"),
            Operation::Action(name) => write!(f, "{}", name),
        }
    }
}

/// Progress of the current commit attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommitPhase {
    #[default]
    Idle,
    /// Waiting for the server; carries the draft generation being sent
    Committing { generation: u64 },
    /// A remove or one-shot action is in flight
    Busy(Operation),
    /// Commit confirmed, draft waiting for the settle window
    Saved { generation: u64 },
    Failed,
}

/// Transient commit state shown next to the editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitState {
    /// Input disabled; also guards against concurrent commits
    pub disabled: bool,
    /// Confirmation text, empty when nothing to show
    pub message: String,
    pub phase: CommitPhase,
}

/// Transition applied to a [`DraftEntity`]
#[derive(Debug, Clone)]
pub enum DraftAction<T: Resource> {
    /// Field edit
    Set(T::Edit),
    /// Store pushed a new canonical snapshot
    ReplaceCanonical(Arc<T>),
    /// Discard the draft
    Cancel,
    /// Start sending the draft
    Commit,
    /// Server confirmed the commit; `committed` becomes the canonical value
    CommitSucceeded {
        committed: Arc<T>,
        message: String,
    },
    CommitFailed,
    /// Start a remove or one-shot action
    Begin(Operation),
    /// Remove or one-shot action completed, successfully or not
    Finished,
    /// Settle window elapsed for a commit of `generation`
    SettleTimeout { generation: u64 },
    /// Message window elapsed for a commit of `generation`
    MessageTimeout { generation: u64 },
}

/// Canonical entity plus the local draft being edited
#[derive(Debug, Clone)]
pub struct DraftEntity<T> {
    canonical: Arc<T>,
    snapshot: Option<T>,
    generation: u64,
    commit: CommitState,
}

impl<T: Resource> DraftEntity<T> {
    pub fn new(canonical: Arc<T>) -> Self {
        Self {
            canonical,
            snapshot: None,
            generation: 0,
            commit: CommitState::default(),
        }
    }

    pub fn from_canonical(canonical: T) -> Self {
        Self::new(Arc::new(canonical))
    }

    /// Entity to render: the draft if one exists, else the canonical snapshot
    pub fn view(&self) -> &T {
        self.snapshot.as_ref().unwrap_or(&*self.canonical)
    }

    pub fn canonical(&self) -> &Arc<T> {
        &self.canonical
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    pub fn has_draft(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Edit counter, bumped by every edit and by cancel
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn commit_state(&self) -> &CommitState {
        &self.commit
    }

    pub fn is_disabled(&self) -> bool {
        self.commit.disabled
    }

    pub fn message(&self) -> &str {
        &self.commit.message
    }

    /// Whether a commit can start: input enabled and a draft that has not
    /// already been saved as is
    pub fn can_commit(&self) -> bool {
        let saved = matches!(
            self.commit.phase,
            CommitPhase::Saved { generation } if generation == self.generation
        );
        !self.commit.disabled && self.snapshot.is_some() && !saved
    }

    /// Payload to send for a commit of the current draft
    pub fn commit_payload(&self) -> Option<T> {
        self.snapshot.as_ref().map(T::prepare_commit)
    }

    /// Apply an action in place
    pub fn dispatch(&mut self, action: DraftAction<T>) {
        let placeholder = DraftEntity::new(Arc::clone(&self.canonical));
        let state = std::mem::replace(self, placeholder);
        *self = reduce(state, action);
    }

    /// Edit a field, creating the draft on first edit
    pub fn set(&mut self, edit: T::Edit) -> &Self {
        self.dispatch(DraftAction::Set(edit));
        self
    }

    /// Discard the draft. Ignored while a commit is in flight.
    pub fn cancel(&mut self) {
        self.dispatch(DraftAction::Cancel);
    }

    pub fn replace_canonical(&mut self, canonical: Arc<T>) {
        self.dispatch(DraftAction::ReplaceCanonical(canonical));
    }
}

/// Pure state transition
pub fn reduce<T: Resource>(mut state: DraftEntity<T>, action: DraftAction<T>) -> DraftEntity<T> {
    match action {
        DraftAction::Set(edit) => {
            let mut snapshot = match state.snapshot.take() {
                Some(snapshot) => snapshot,
                None => (*state.canonical).clone(),
            };
            snapshot.apply(edit);
            state.snapshot = Some(snapshot);
            state.generation += 1;
            state.commit.message.clear();
            if matches!(
                state.commit.phase,
                CommitPhase::Saved { .. } | CommitPhase::Failed
            ) {
                state.commit.phase = CommitPhase::Idle;
            }
        }
        DraftAction::ReplaceCanonical(canonical) => {
            // The draft wins over the store until it is committed or cancelled
            state.canonical = canonical;
        }
        DraftAction::Cancel => {
            if state.commit.disabled {
                tracing::debug!("Ignoring cancel of {} while busy", T::KIND);
                return state;
            }
            state.snapshot = None;
            state.generation += 1;
            state.commit.phase = CommitPhase::Idle;
        }
        DraftAction::Commit => {
            if !state.can_commit() {
                tracing::debug!(
                    "Ignoring commit of {} (disabled: {}, draft: {})",
                    T::KIND,
                    state.commit.disabled,
                    state.has_draft()
                );
                return state;
            }
            state.commit.disabled = true;
            state.commit.phase = CommitPhase::Committing {
                generation: state.generation,
            };
        }
        DraftAction::CommitSucceeded { committed, message } => {
            if let CommitPhase::Committing { generation } = state.commit.phase {
                // Shown once the draft settles, until the store pushes a newer value
                state.canonical = committed;
                state.commit.disabled = false;
                state.commit.message = message;
                state.commit.phase = CommitPhase::Saved { generation };
            }
        }
        DraftAction::CommitFailed => {
            if let CommitPhase::Committing { .. } = state.commit.phase {
                state.commit.disabled = false;
                state.commit.message.clear();
                state.commit.phase = CommitPhase::Failed;
            }
        }
        DraftAction::Begin(operation) => {
            if state.commit.disabled {
                tracing::debug!("Ignoring {} of {} while busy", operation, T::KIND);
                return state;
            }
            state.commit.disabled = true;
            state.commit.phase = CommitPhase::Busy(operation);
        }
        DraftAction::Finished => {
            if let CommitPhase::Busy(_) = state.commit.phase {
                state.commit.disabled = false;
                state.commit.phase = CommitPhase::Idle;
            }
        }
        DraftAction::SettleTimeout { generation } => {
            if generation != state.generation || state.commit.disabled {
                tracing::debug!(
                    "Stale settle for {} (scheduled at {}, now {})",
                    T::KIND,
                    generation,
                    state.generation
                );
                return state;
            }
            state.snapshot = None;
            if let CommitPhase::Saved { .. } = state.commit.phase {
                state.commit.phase = CommitPhase::Idle;
            }
        }
        DraftAction::MessageTimeout { generation } => {
            if generation == state.generation {
                state.commit.message.clear();
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Disk, DiskEdit};

    fn disk() -> DraftEntity<Disk> {
        DraftEntity::from_canonical(Disk {
            id: "disk-1".to_string(),
            name: "d1".to_string(),
            size: 10,
            ..Default::default()
        })
    }

    fn succeeded(draft: &DraftEntity<Disk>) -> DraftAction<Disk> {
        DraftAction::CommitSucceeded {
            committed: Arc::new(draft.commit_payload().unwrap()),
            message: "saved".to_string(),
        }
    }

    fn committed(mut draft: DraftEntity<Disk>) -> DraftEntity<Disk> {
        let action = succeeded(&draft);
        draft = reduce(draft, DraftAction::Commit);
        reduce(draft, action)
    }

    #[test]
    fn test_set_creates_draft() {
        let mut draft = disk();
        assert!(!draft.has_draft());

        draft.set(DiskEdit::Name("d2".to_string()));

        assert!(draft.has_draft());
        assert_eq!(draft.view().name, "d2");
        assert_eq!(draft.canonical().name, "d1");
        assert_eq!(draft.generation(), 1);
    }

    #[test]
    fn test_set_clears_message() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        draft = committed(draft);
        assert_eq!(draft.message(), "saved");

        draft.set(DiskEdit::Name("d3".to_string()));
        assert_eq!(draft.message(), "");
        assert_eq!(draft.commit_state().phase, CommitPhase::Idle);
    }

    #[test]
    fn test_commit_without_draft_is_ignored() {
        let draft = reduce(disk(), DraftAction::Commit);
        assert!(!draft.is_disabled());
        assert_eq!(draft.commit_state().phase, CommitPhase::Idle);
    }

    #[test]
    fn test_commit_while_disabled_is_ignored() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        draft = reduce(draft, DraftAction::Commit);
        draft.set(DiskEdit::Name("d3".to_string()));

        let draft = reduce(draft, DraftAction::Commit);
        assert_eq!(
            draft.commit_state().phase,
            CommitPhase::Committing { generation: 1 }
        );
    }

    #[test]
    fn test_settle_discards_unchanged_draft() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let draft = committed(draft);

        let draft = reduce(draft, DraftAction::SettleTimeout { generation: 1 });
        assert!(!draft.has_draft());
        assert_eq!(draft.commit_state().phase, CommitPhase::Idle);
        assert_eq!(draft.message(), "saved");
    }

    #[test]
    fn test_settle_keeps_newer_draft() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let mut draft = committed(draft);
        draft.set(DiskEdit::Comment("newer".to_string()));

        let draft = reduce(draft, DraftAction::SettleTimeout { generation: 1 });
        assert!(draft.has_draft());
        assert_eq!(draft.view().comment, "newer");
    }

    #[test]
    fn test_edit_during_commit_survives_settle() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let action = succeeded(&draft);
        draft = reduce(draft, DraftAction::Commit);
        draft.set(DiskEdit::Name("d3".to_string()));
        draft = reduce(draft, action);

        let draft = reduce(draft, DraftAction::SettleTimeout { generation: 1 });
        assert!(draft.has_draft());
        assert_eq!(draft.view().name, "d3");
    }

    #[test]
    fn test_failed_commit_keeps_draft() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        draft = reduce(draft, DraftAction::Commit);
        assert!(draft.is_disabled());

        let draft = reduce(draft, DraftAction::CommitFailed);
        assert!(!draft.is_disabled());
        assert!(draft.has_draft());
        assert_eq!(draft.view().name, "d2");
        assert_eq!(draft.message(), "");
        assert_eq!(draft.commit_state().phase, CommitPhase::Failed);
    }

    #[test]
    fn test_cancel_ignored_while_committing() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        draft = reduce(draft, DraftAction::Commit);

        draft.cancel();
        assert!(draft.has_draft());

        draft = reduce(draft, DraftAction::CommitFailed);
        draft.cancel();
        assert!(!draft.has_draft());
        assert_eq!(draft.view().name, "d1");
    }

    #[test]
    fn test_message_timeout() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let draft = committed(draft);

        let stale = reduce(draft.clone(), DraftAction::MessageTimeout { generation: 0 });
        assert_eq!(stale.message(), "saved");

        let cleared = reduce(draft, DraftAction::MessageTimeout { generation: 1 });
        assert_eq!(cleared.message(), "");
    }

    #[test]
    fn test_begin_and_finish_operation() {
        let draft = reduce(disk(), DraftAction::Begin(Operation::Remove));
        assert!(draft.is_disabled());

        let draft = reduce(
            draft,
            DraftAction::Begin(Operation::Action("restore".to_string())),
        );
        assert_eq!(
            draft.commit_state().phase,
            CommitPhase::Busy(Operation::Remove)
        );

        let draft = reduce(draft, DraftAction::Finished);
        assert!(!draft.is_disabled());
        assert_eq!(draft.commit_state().phase, CommitPhase::Idle);
    }

    #[test]
    fn test_settle_skipped_while_busy() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let draft = committed(draft);
        let draft = reduce(draft, DraftAction::Begin(Operation::Remove));

        let draft = reduce(draft, DraftAction::SettleTimeout { generation: 1 });
        assert!(draft.has_draft());
    }

    #[test]
    fn test_settled_view_shows_committed_value() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let draft = committed(draft);
        assert_eq!(draft.canonical().name, "d2");

        let draft = reduce(draft, DraftAction::SettleTimeout { generation: 1 });
        assert!(!draft.has_draft());
        assert_eq!(draft.view().name, "d2");
        assert_eq!(draft.view().size, 10);
    }

    #[test]
    fn test_saved_draft_cannot_be_recommitted() {
        let mut draft = disk();
        draft.set(DiskEdit::Name("d2".to_string()));
        let draft = committed(draft);
        assert!(!draft.can_commit());

        let draft = reduce(draft, DraftAction::Commit);
        assert!(!draft.is_disabled());
        assert_eq!(
            draft.commit_state().phase,
            CommitPhase::Saved { generation: 1 }
        );

        // The message of the first commit still clears on time
        let draft = reduce(draft, DraftAction::MessageTimeout { generation: 1 });
        assert_eq!(draft.message(), "");

        let mut draft = draft;
        draft.set(DiskEdit::Name("d3".to_string()));
        assert!(draft.can_commit());
    }
}
