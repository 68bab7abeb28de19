use anyhow::anyhow;
use async_trait::async_trait;
use cloudpanel_commit::{MemoryStore, ResourceApi, Result};
use cloudpanel_draft::Resource;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Fake server
///
/// Accepted commits are written through to the store when one is attached,
/// the way backend sync would push them.
pub struct MockApi<T: Resource> {
    store: Option<Arc<MemoryStore<T>>>,
    delay: Duration,
    fail: AtomicBool,
    commits: AtomicUsize,
    removes: AtomicUsize,
    received: Mutex<Vec<T>>,
}

impl<T: Resource> MockApi<T> {
    pub fn new() -> Self {
        Self {
            store: None,
            delay: Duration::from_millis(100),
            fail: AtomicBool::new(false),
            commits: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_store(mut self, store: Arc<MemoryStore<T>>) -> Self {
        self.store = Some(store);
        self
    }

    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Payloads received by `commit`, in order
    pub fn received(&self) -> Vec<T> {
        self.received.lock().unwrap().clone()
    }

    fn check(&self, call: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("{} refused by server", call).into());
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Resource> ResourceApi<T> for MockApi<T> {
    async fn commit(&self, entity: T) -> Result<T> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(entity.clone());
        tokio::time::sleep(self.delay).await;
        self.check("commit")?;
        if let Some(store) = &self.store {
            store.put(entity.clone());
        }
        Ok(entity)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.check("remove")?;
        if let Some(store) = &self.store {
            store.remove(id);
        }
        Ok(())
    }
}
