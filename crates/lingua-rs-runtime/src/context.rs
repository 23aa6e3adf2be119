//! The authoritative active language for one session.
//!
//! A [`PreferenceContext`] starts with an initial language, may be
//! overridden once by the persisted preference ([`restore`]), and is changed
//! explicitly through [`set_active_language`]. Every change that alters the
//! value is announced synchronously to subscribers; every explicit set is
//! mirrored to the [`PreferenceStore`] in the background.
//!
//! Saves go through a single worker task per context, fed by a queue, so
//! they reach the medium in call order and the last choice wins.
//!
//! [`restore`]: PreferenceContext::restore
//! [`set_active_language`]: PreferenceContext::set_active_language

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use lingua_rs_core::logging::session_span;
use lingua_rs_core::{Lang, Language};
use lingua_rs_signals::{Signal, Subscription};
use lingua_rs_storage::PreferenceStore;

/// Payload delivered to subscribers when the active language changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChanged<L> {
    /// The language active before the change.
    pub previous: L,
    /// The language active now.
    pub current: L,
}

/// What a restore attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome<L> {
    /// The stored language was applied.
    Applied(L),
    /// Nothing usable was stored; the active language is unchanged.
    NotFound,
    /// An explicit change was made before the stored value could be
    /// applied; the stored value was ignored.
    Superseded,
    /// A restore had already been attempted on this context.
    AlreadyAttempted,
    /// The context was dropped before the load finished.
    Discarded,
}

enum SaveCommand<L> {
    Save(L),
    Flush(oneshot::Sender<()>),
}

struct Inner<L: Language> {
    session_id: Uuid,
    span: tracing::Span,
    active: RwLock<L>,
    // Bumped under the `active` write lock by every explicit set; zero means
    // the session has only ever seen its initial language.
    generation: AtomicU64,
    restore_attempted: AtomicBool,
    changed: Arc<Signal<LanguageChanged<L>>>,
    store: PreferenceStore<L>,
    saver: Mutex<Option<mpsc::UnboundedSender<SaveCommand<L>>>>,
}

/// A cloneable handle to one session's language state.
///
/// Clones share state. The handle is `Send + Sync`; reads are cheap and
/// concurrent, writes are expected from one place at a time.
pub struct PreferenceContext<L: Language = Lang> {
    inner: Arc<Inner<L>>,
}

impl<L: Language> Clone for PreferenceContext<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Language> fmt::Debug for PreferenceContext<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceContext")
            .field("session_id", &self.inner.session_id)
            .field("active", &self.active_language())
            .field("subscribers", &self.inner.changed.receiver_count())
            .finish_non_exhaustive()
    }
}

impl<L: Language> PreferenceContext<L> {
    /// Creates a context starting at [`Language::DEFAULT`].
    pub fn new(store: PreferenceStore<L>) -> Self {
        Self::with_language(L::DEFAULT, store)
    }

    /// Creates a context starting at `initial`.
    pub fn with_language(initial: L, store: PreferenceStore<L>) -> Self {
        let session_id = Uuid::new_v4();
        let span = session_span(&session_id.to_string());
        span.in_scope(|| tracing::debug!(language = initial.code(), "language context created"));

        Self {
            inner: Arc::new(Inner {
                session_id,
                span,
                active: RwLock::new(initial),
                generation: AtomicU64::new(0),
                restore_attempted: AtomicBool::new(false),
                changed: Arc::new(Signal::new()),
                store,
                saver: Mutex::new(None),
            }),
        }
    }

    /// The id attached to this session's logging span.
    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    /// The store this context mirrors its changes to.
    pub fn store(&self) -> &PreferenceStore<L> {
        &self.inner.store
    }

    /// The currently active language.
    pub fn active_language(&self) -> L {
        *self.inner.active.read().expect("language lock poisoned")
    }

    /// Makes `language` the active language.
    ///
    /// The in-memory value changes before this returns, and subscribers are
    /// notified before this returns if the value actually changed. One save
    /// is queued per call regardless; its failure is logged and never
    /// undoes the change.
    pub fn set_active_language(&self, language: L) {
        let _entered = self.inner.span.enter();

        let previous = {
            let mut active = self.inner.active.write().expect("language lock poisoned");
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            std::mem::replace(&mut *active, language)
        };

        if previous == language {
            tracing::debug!(language = language.code(), "language unchanged");
        } else {
            tracing::info!(from = previous.code(), to = language.code(), "language changed");
            self.inner.changed.send(&LanguageChanged {
                previous,
                current: language,
            });
        }

        if !self.send_command(SaveCommand::Save(language)) {
            tracing::warn!(
                language = language.code(),
                "no async runtime available; language preference not persisted"
            );
        }
    }

    /// Registers `callback` for language changes until the returned
    /// [`Subscription`] is dropped.
    ///
    /// Callbacks run on the thread that made the change, after the new value
    /// is visible through [`active_language`](Self::active_language).
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LanguageChanged<L>) + Send + Sync + 'static,
    {
        self.inner.changed.subscribe(callback)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.changed.receiver_count()
    }

    /// Loads the persisted preference once and applies it.
    ///
    /// Only the first restore on a context does anything. The stored value
    /// is never applied once [`set_active_language`](Self::set_active_language)
    /// has been called on this context, whether before or during the load:
    /// an explicit choice is always newer than the persisted one. Applying a
    /// restored value notifies subscribers but does not write it back.
    pub async fn restore(&self) -> RestoreOutcome<L> {
        if !self.begin_restore() {
            return RestoreOutcome::AlreadyAttempted;
        }
        if self.explicitly_set() {
            self.inner
                .span
                .in_scope(|| tracing::debug!("language already chosen; skipping preference restore"));
            return RestoreOutcome::Superseded;
        }
        let loaded = self
            .inner
            .store
            .load()
            .instrument(self.inner.span.clone())
            .await;
        self.inner
            .span
            .in_scope(|| apply_restored(&self.inner, loaded))
    }

    /// Runs [`restore`](Self::restore) as a task on the current tokio runtime.
    ///
    /// The task holds only a weak reference to the context; if every handle
    /// is dropped before the load finishes, it resolves to
    /// [`RestoreOutcome::Discarded`]. Returns `None` when there is no
    /// runtime or a restore was already attempted.
    pub fn spawn_restore(&self) -> Option<JoinHandle<RestoreOutcome<L>>> {
        let Ok(handle) = Handle::try_current() else {
            self.inner
                .span
                .in_scope(|| tracing::debug!("no async runtime available; skipping preference restore"));
            return None;
        };
        if !self.begin_restore() {
            return None;
        }

        let store = self.inner.store.clone();
        let weak: Weak<Inner<L>> = Arc::downgrade(&self.inner);
        let task = async move {
            let loaded = store.load().await;
            match weak.upgrade() {
                Some(inner) => apply_restored(&inner, loaded),
                None => {
                    tracing::debug!("session ended before preference restore finished");
                    RestoreOutcome::Discarded
                }
            }
        };
        Some(handle.spawn(task.instrument(self.inner.span.clone())))
    }

    /// Waits until every save queued so far has reached the medium (or
    /// failed).
    pub async fn settle(&self) {
        let (done, finished) = oneshot::channel();
        if self.send_command(SaveCommand::Flush(done)) {
            finished.await.ok();
        }
    }

    /// Marks the restore as attempted. Returns `false` if one already was.
    fn begin_restore(&self) -> bool {
        if self.inner.restore_attempted.swap(true, Ordering::SeqCst) {
            self.inner
                .span
                .in_scope(|| tracing::debug!("preference restore already attempted"));
            return false;
        }
        true
    }

    fn explicitly_set(&self) -> bool {
        self.inner.generation.load(Ordering::SeqCst) != 0
    }

    /// Queues `command` for the save worker, starting a worker on the
    /// current runtime if none is running. Returns `false` if there is no
    /// runtime to run one on.
    fn send_command(&self, command: SaveCommand<L>) -> bool {
        let mut saver = self.inner.saver.lock().expect("save queue lock poisoned");

        let command = match saver.as_ref() {
            Some(queue) => match queue.send(command) {
                Ok(()) => return true,
                // The worker's runtime is gone; start a new one below.
                Err(mpsc::error::SendError(command)) => command,
            },
            None => command,
        };

        let Ok(handle) = Handle::try_current() else {
            *saver = None;
            return false;
        };
        let (queue, commands) = mpsc::unbounded_channel();
        handle.spawn(run_saver(self.inner.store.clone(), commands).instrument(self.inner.span.clone()));
        let queued = queue.send(command).is_ok();
        *saver = Some(queue);
        queued
    }
}

fn apply_restored<L: Language>(inner: &Inner<L>, loaded: Option<L>) -> RestoreOutcome<L> {
    let (previous, language) = {
        let mut active = inner.active.write().expect("language lock poisoned");
        if inner.generation.load(Ordering::SeqCst) != 0 {
            tracing::debug!("language chosen explicitly before restore finished; keeping it");
            return RestoreOutcome::Superseded;
        }
        let Some(language) = loaded else {
            tracing::debug!("no stored language preference to restore");
            return RestoreOutcome::NotFound;
        };
        (std::mem::replace(&mut *active, language), language)
    };

    if previous != language {
        tracing::info!(from = previous.code(), to = language.code(), "restored language preference");
        inner.changed.send(&LanguageChanged {
            previous,
            current: language,
        });
    }
    RestoreOutcome::Applied(language)
}

async fn run_saver<L: Language>(
    store: PreferenceStore<L>,
    mut commands: mpsc::UnboundedReceiver<SaveCommand<L>>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            // Failures are logged by the store.
            SaveCommand::Save(language) => {
                let _ = store.save(language).await;
            }
            SaveCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::trace!("save worker stopped");
}
