//! Commit controller
//!
//! Owns the draft of one expanded detail editor and runs the asynchronous
//! calls against the remote API.
//!
//! ```text
//!  Idle ──commit()──▶ Committing ──ok──▶ Saved ──settle──▶ Idle
//!                          │
//!                          └──err──▶ Failed (draft kept, retry or cancel)
//! ```
//!
//! Only one commit, remove or one-shot action runs at a time. A call made
//! while another is in flight returns `Skipped` without reaching the API.

use crate::error::{CommitError, Result};
use crate::port::{CanonicalStore, ResourceApi};
use crate::schedule::ScheduledTask;
use crate::store::StoreSubscription;
use cloudpanel_config::{ConsoleConfig, SettleWindows};
use cloudpanel_draft::{
    DraftAction, DraftEntity, DraftError, Operation, OrderedField, Resource, TagField,
};
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

/// Result of [`CommitController::commit`]
#[derive(Debug)]
pub enum CommitOutcome<T> {
    /// Server accepted the draft and returned this value
    Saved(T),
    /// Server rejected the draft; it is still being edited
    Failed(CommitError),
    /// Another call was in flight, or there was nothing to save
    Skipped,
}

impl<T> CommitOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, CommitOutcome::Saved(_))
    }
}

/// Result of [`CommitController::remove`]
#[derive(Debug)]
pub enum RemoveOutcome {
    Removed,
    Failed(CommitError),
    Skipped,
}

/// Draft owner for one resource editor
pub struct CommitController<T: Resource, A> {
    state: Arc<watch::Sender<DraftEntity<T>>>,
    api: Arc<A>,
    windows: SettleWindows,
}

impl<T, A> CommitController<T, A>
where
    T: Resource,
    A: ResourceApi<T>,
{
    pub fn new(canonical: Arc<T>, api: Arc<A>, windows: SettleWindows) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(DraftEntity::new(canonical))),
            api,
            windows,
        }
    }

    /// Controller using the configured windows for `T`
    pub fn with_config(canonical: Arc<T>, api: Arc<A>, config: &ConsoleConfig) -> Self {
        Self::new(canonical, api, config.windows(T::KIND))
    }

    pub fn windows(&self) -> &SettleWindows {
        &self.windows
    }

    /// Borrow the current draft state
    ///
    /// Do not hold the returned guard across an await point.
    pub fn state(&self) -> watch::Ref<'_, DraftEntity<T>> {
        self.state.borrow()
    }

    /// Receiver notified on every state change, for re-rendering
    pub fn subscribe(&self) -> watch::Receiver<DraftEntity<T>> {
        self.state.subscribe()
    }

    /// Entity to render, draft first
    pub fn view(&self) -> T {
        self.state.borrow().view().clone()
    }

    pub fn has_draft(&self) -> bool {
        self.state.borrow().has_draft()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().is_disabled()
    }

    pub fn message(&self) -> String {
        self.state.borrow().message().to_string()
    }

    pub fn dispatch(&self, action: DraftAction<T>) {
        self.state.send_modify(|draft| draft.dispatch(action));
    }

    pub fn set(&self, edit: T::Edit) {
        self.dispatch(DraftAction::Set(edit));
    }

    /// Discard the draft; ignored while a call is in flight
    pub fn cancel(&self) {
        self.dispatch(DraftAction::Cancel);
    }

    pub fn insert_after<F: OrderedField<T>>(&self, index: usize) {
        self.state.send_modify(|draft| {
            draft.insert_after::<F>(index);
        });
    }

    pub fn replace_at<F: OrderedField<T>>(
        &self,
        index: usize,
        record: F::Record,
    ) -> std::result::Result<(), DraftError> {
        let mut result = Ok(());
        self.state
            .send_if_modified(|draft| match draft.replace_at::<F>(index, record) {
                Ok(_) => true,
                Err(e) => {
                    result = Err(e);
                    false
                }
            });
        result
    }

    pub fn remove_at<F: OrderedField<T>>(
        &self,
        index: usize,
    ) -> std::result::Result<(), DraftError> {
        let mut result = Ok(());
        self.state
            .send_if_modified(|draft| match draft.remove_at::<F>(index) {
                Ok(_) => true,
                Err(e) => {
                    result = Err(e);
                    false
                }
            });
        result
    }

    pub fn insert_tag<F: TagField<T>>(&self, value: &str) -> bool {
        self.state
            .send_if_modified(|draft| draft.insert_tag::<F>(value))
    }

    pub fn remove_tag<F: TagField<T>>(&self, value: &str) -> bool {
        self.state
            .send_if_modified(|draft| draft.remove_tag::<F>(value))
    }

    /// Send the draft to the server
    ///
    /// On success the server-confirmed value becomes the canonical snapshot
    /// and the draft stays visible until the settle window elapses without a
    /// newer edit. On failure the draft is kept for a retry. A draft that was
    /// already saved unchanged is skipped.
    pub async fn commit(&self) -> CommitOutcome<T> {
        let mut started = None;
        self.state.send_if_modified(|draft| {
            if !draft.can_commit() {
                return false;
            }
            started = draft
                .commit_payload()
                .map(|payload| (payload, draft.generation()));
            draft.dispatch(DraftAction::Commit);
            true
        });

        let Some((payload, generation)) = started else {
            tracing::debug!("Skipping commit of {}: busy or no changes", T::KIND);
            return CommitOutcome::Skipped;
        };

        let id = payload.id().to_string();
        let mut in_flight = InFlight::new(&self.state, DraftAction::CommitFailed);
        let result = self.api.commit(payload).await;
        in_flight.disarm();

        match result {
            Ok(committed) => {
                tracing::info!("Committed {} {}", T::KIND, id);
                self.dispatch(DraftAction::CommitSucceeded {
                    committed: Arc::new(committed.clone()),
                    message: self.windows.message.clone(),
                });
                for task in ScheduledTask::after_commit(generation, &self.windows) {
                    task.spawn(Arc::downgrade(&self.state));
                }
                CommitOutcome::Saved(committed)
            }
            Err(e) => {
                tracing::warn!("Commit of {} {} rejected: {}", T::KIND, id, e);
                self.dispatch(DraftAction::CommitFailed);
                CommitOutcome::Failed(e)
            }
        }
    }

    /// Delete the resource; the store drops it from its list on success
    pub async fn remove(&self) -> RemoveOutcome {
        let id = self.state.borrow().canonical().id().to_string();
        match self.run(Operation::Remove, self.api.remove(&id)).await {
            Some(Ok(())) => {
                tracing::info!("Removed {} {}", T::KIND, id);
                RemoveOutcome::Removed
            }
            Some(Err(e)) => RemoveOutcome::Failed(e),
            None => RemoveOutcome::Skipped,
        }
    }

    /// Run a one-shot call (restore, test alert, ...) under the disable guard
    ///
    /// The draft is left untouched. Returns `None` without polling `call`
    /// when another call is in flight.
    pub async fn run<F, R>(&self, operation: Operation, call: F) -> Option<Result<R>>
    where
        F: Future<Output = Result<R>>,
    {
        let label = operation.to_string();
        let started = self.state.send_if_modified(|draft| {
            if draft.is_disabled() {
                return false;
            }
            draft.dispatch(DraftAction::Begin(operation));
            true
        });
        if !started {
            tracing::debug!("Skipping {} of {}: busy", label, T::KIND);
            return None;
        }

        let mut in_flight = InFlight::new(&self.state, DraftAction::Finished);
        let result = call.await;
        in_flight.disarm();
        self.dispatch(DraftAction::Finished);

        if let Err(e) = &result {
            tracing::warn!("{} of {} rejected: {}", label, T::KIND, e);
        }
        Some(result)
    }

    /// Follow canonical updates for this entity
    ///
    /// The canonical snapshot is refreshed right away and on every store
    /// event concerning the entity. Keep the returned guard for as long as
    /// the editor is open.
    pub fn watch_store<S>(&self, store: Arc<S>) -> StoreSubscription
    where
        S: CanonicalStore<T> + 'static,
    {
        let id = self.state.borrow().canonical().id().to_string();
        let mut events = store.changes();
        refresh(&self.state, store.as_ref(), &id);

        let state = Arc::downgrade(&self.state);
        let listener = tokio::spawn(async move {
            loop {
                let refresh_needed = match events.recv().await {
                    Ok(event) => event.concerns(&id),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("Missed {} store events for {} {}", skipped, T::KIND, id);
                        true
                    }
                    Err(RecvError::Closed) => break,
                };
                if !refresh_needed {
                    continue;
                }
                let Some(state) = Weak::upgrade(&state) else {
                    break;
                };
                refresh(&state, store.as_ref(), &id);
            }
        });

        StoreSubscription::new(listener)
    }
}

/// Pull the canonical snapshot of `id` from the store into the draft state
fn refresh<T, S>(state: &watch::Sender<DraftEntity<T>>, store: &S, id: &str)
where
    T: Resource,
    S: CanonicalStore<T> + ?Sized,
{
    let Some(canonical) = store.get(id) else {
        tracing::debug!("{} {} is no longer in the store", T::KIND, id);
        return;
    };
    state.send_if_modified(|draft| {
        if Arc::ptr_eq(draft.canonical(), &canonical) {
            return false;
        }
        draft.replace_canonical(canonical);
        true
    });
}

/// Re-enables the editor if a call future is dropped before it resolves
struct InFlight<'a, T: Resource> {
    state: &'a watch::Sender<DraftEntity<T>>,
    on_abandon: Option<DraftAction<T>>,
}

impl<'a, T: Resource> InFlight<'a, T> {
    fn new(state: &'a watch::Sender<DraftEntity<T>>, on_abandon: DraftAction<T>) -> Self {
        Self {
            state,
            on_abandon: Some(on_abandon),
        }
    }

    fn disarm(&mut self) {
        self.on_abandon = None;
    }
}

impl<T: Resource> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(action) = self.on_abandon.take() {
            tracing::debug!("Call for {} abandoned before completion", T::KIND);
            self.state.send_modify(|draft| draft.dispatch(action));
        }
    }
}
