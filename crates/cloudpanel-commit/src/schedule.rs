//! Delayed reconciliation tasks
//!
//! A task carries the draft generation it was scheduled against. Tasks are
//! never cancelled: when one fires after a newer edit, the reducer sees a
//! different generation and ignores it.

use cloudpanel_config::SettleWindows;
use cloudpanel_draft::{DraftAction, DraftEntity, Resource};
use std::sync::Weak;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Discard the committed draft
    Settle,
    /// Clear the confirmation message
    ClearMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub generation: u64,
    pub delay: Duration,
}

impl ScheduledTask {
    pub fn settle(generation: u64, delay: Duration) -> Self {
        Self {
            kind: TaskKind::Settle,
            generation,
            delay,
        }
    }

    pub fn clear_message(generation: u64, delay: Duration) -> Self {
        Self {
            kind: TaskKind::ClearMessage,
            generation,
            delay,
        }
    }

    /// Tasks following a successful commit of `generation`
    pub fn after_commit(generation: u64, windows: &SettleWindows) -> Vec<Self> {
        let mut tasks = vec![Self::settle(generation, windows.settle())];
        if let Some(delay) = windows.message_window() {
            tasks.push(Self::clear_message(generation, delay));
        }
        tasks
    }

    /// Action dispatched when the task fires
    pub fn action<T: Resource>(&self) -> DraftAction<T> {
        match self.kind {
            TaskKind::Settle => DraftAction::SettleTimeout {
                generation: self.generation,
            },
            TaskKind::ClearMessage => DraftAction::MessageTimeout {
                generation: self.generation,
            },
        }
    }

    /// Run the task on the runtime; a dropped editor turns it into a no-op
    pub(crate) fn spawn<T: Resource>(
        self,
        state: Weak<watch::Sender<DraftEntity<T>>>,
    ) -> JoinHandle<()> {
        tracing::debug!(
            "Scheduling {:?} for {} generation {} in {:?}",
            self.kind,
            T::KIND,
            self.generation,
            self.delay
        );
        tokio::spawn(async move {
            tokio::time::sleep(self.delay).await;
            match state.upgrade() {
                Some(state) => state.send_modify(|draft| draft.dispatch(self.action())),
                None => {
                    tracing::debug!("{:?} fired after the {} editor closed", self.kind, T::KIND)
                }
            }
        })
    }
}
