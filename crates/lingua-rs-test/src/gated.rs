//! Storage whose reads block until a test releases them.
//!
//! [`GatedStorage`] wraps another medium and holds every `get` at a gate.
//! Tests use it to let consumers render with the default language first and
//! only then let the stored preference "arrive".

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lingua_rs_core::LinguaResult;
use lingua_rs_storage::StorageBackend;
use tokio::sync::Notify;

#[derive(Default)]
struct Gate {
    open: AtomicBool,
    opened: Notify,
    waiting: AtomicUsize,
    arrived: Notify,
}

/// A medium that holds reads until [`release`](Self::release) is called.
///
/// Writes pass straight through. Clones share the gate.
#[derive(Clone)]
pub struct GatedStorage {
    inner: Arc<dyn StorageBackend>,
    gate: Arc<Gate>,
}

impl std::fmt::Debug for GatedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatedStorage")
            .field("open", &self.gate.open.load(Ordering::SeqCst))
            .field("waiting", &self.gate.waiting.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl GatedStorage {
    /// Wraps `inner` behind a closed gate.
    pub fn new(inner: Arc<dyn StorageBackend>) -> Self {
        Self {
            inner,
            gate: Arc::new(Gate::default()),
        }
    }

    /// Opens the gate. Held reads proceed, later reads are not held.
    pub fn release(&self) {
        self.gate.open.store(true, Ordering::SeqCst);
        self.gate.opened.notify_waiters();
    }

    /// Number of reads currently held at the gate.
    pub fn waiting(&self) -> usize {
        self.gate.waiting.load(Ordering::SeqCst)
    }

    /// Resolves once at least one read is held at the gate.
    pub async fn read_arrived(&self) {
        loop {
            let arrived = self.gate.arrived.notified();
            if self.waiting() > 0 {
                return;
            }
            arrived.await;
        }
    }

    async fn pass(&self) {
        loop {
            let opened = self.gate.opened.notified();
            if self.gate.open.load(Ordering::SeqCst) {
                return;
            }
            opened.await;
        }
    }
}

#[async_trait]
impl StorageBackend for GatedStorage {
    async fn get(&self, key: &str) -> LinguaResult<Option<String>> {
        self.gate.waiting.fetch_add(1, Ordering::SeqCst);
        self.gate.arrived.notify_waiters();
        self.pass().await;
        self.gate.waiting.fetch_sub(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> LinguaResult<()> {
        self.inner.set(key, value).await
    }
}
