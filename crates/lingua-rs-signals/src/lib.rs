//! # lingua-rs-signals
//!
//! Synchronous observer lists. A [`Signal`] holds receivers and calls each
//! of them, in connection order, on the sender's thread before
//! [`send`](Signal::send) returns. lingua-rs uses one to tell every live
//! consumer that the active language changed, so nothing keeps rendering a
//! stale snapshot.
//!
//! ## Usage
//!
//! ```
//! use lingua_rs_signals::Signal;
//! use std::sync::Arc;
//!
//! let signal: Arc<Signal<String>> = Arc::new(Signal::new());
//!
//! let subscription = signal.subscribe(|msg: &String| {
//!     println!("Received: {msg}");
//! });
//!
//! assert_eq!(signal.send(&"hello".to_string()), 1);
//!
//! drop(subscription);
//! assert_eq!(signal.receiver_count(), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

/// The type signature for a signal receiver callback.
///
/// Receivers must be `Send + Sync` so that signals can be dispatched from
/// any thread.
pub type SignalReceiver<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A signal that can be connected to and dispatched.
///
/// Each signal carries a payload type `T`. Receivers are called in the order
/// they were connected.
pub struct Signal<T: 'static> {
    receivers: RwLock<Vec<(String, SignalReceiver<T>)>>,
    next_anonymous: AtomicU64,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.receiver_count())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a new signal with no connected receivers.
    pub fn new() -> Self {
        Self {
            receivers: RwLock::new(Vec::new()),
            next_anonymous: AtomicU64::new(0),
        }
    }

    /// Connects a receiver under an explicit id.
    ///
    /// If a receiver with the same id is already connected, it is replaced
    /// in place and keeps its position.
    pub fn connect(&self, receiver_id: impl Into<String>, callback: SignalReceiver<T>) {
        let id = receiver_id.into();
        let mut receivers = self.receivers.write().expect("signal lock poisoned");

        if let Some(entry) = receivers.iter_mut().find(|(rid, _)| *rid == id) {
            entry.1 = callback;
        } else {
            receivers.push((id, callback));
        }
    }

    /// Disconnects the receiver with the given id.
    ///
    /// Returns `true` if a receiver was found and removed.
    pub fn disconnect(&self, receiver_id: &str) -> bool {
        let mut receivers = self.receivers.write().expect("signal lock poisoned");
        let len_before = receivers.len();
        receivers.retain(|(id, _)| id != receiver_id);
        receivers.len() < len_before
    }

    /// Sends the signal to all connected receivers.
    ///
    /// The receiver list is snapshotted first and the lock released before
    /// any callback runs, so receivers may read shared state, connect, or
    /// disconnect from inside a callback. A receiver removed during a
    /// dispatch still sees that dispatch. Returns the number of receivers
    /// called.
    pub fn send(&self, payload: &T) -> usize {
        let snapshot: Vec<SignalReceiver<T>> = self
            .receivers
            .read()
            .expect("signal lock poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        tracing::trace!(receivers = snapshot.len(), "dispatching signal");
        for callback in &snapshot {
            callback(payload);
        }
        snapshot.len()
    }

    /// Returns the number of connected receivers.
    pub fn receiver_count(&self) -> usize {
        self.receivers.read().expect("signal lock poisoned").len()
    }
}

impl<T: 'static> Signal<T> {
    /// Connects `callback` under a generated id and returns a guard that
    /// disconnects it when dropped.
    ///
    /// The guard holds only a weak reference, so it never keeps the signal
    /// alive.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let n = self.next_anonymous.fetch_add(1, Ordering::Relaxed);
        let id = format!("subscription-{n}");
        self.connect(id.clone(), Arc::new(callback));

        let signal: Weak<dyn Disconnect> = Arc::downgrade(self) as Weak<dyn Disconnect>;
        Subscription {
            id,
            signal: Some(signal),
        }
    }
}

/// Type-erased disconnect, so [`Subscription`] needs no payload parameter.
trait Disconnect: Send + Sync {
    fn disconnect_id(&self, receiver_id: &str) -> bool;
}

impl<T: 'static> Disconnect for Signal<T> {
    fn disconnect_id(&self, receiver_id: &str) -> bool {
        self.disconnect(receiver_id)
    }
}

/// A live connection created by [`Signal::subscribe`].
///
/// Dropping it disconnects the receiver.
#[must_use = "dropping a Subscription immediately disconnects its receiver"]
pub struct Subscription {
    id: String,
    signal: Option<Weak<dyn Disconnect>>,
}

impl Subscription {
    /// The generated receiver id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns `true` while the receiver is still connected to a live signal.
    pub fn is_active(&self) -> bool {
        self.signal
            .as_ref()
            .is_some_and(|signal| signal.strong_count() > 0)
    }

    /// Disconnects now. Returns `true` if the receiver was still connected.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        self.signal
            .take()
            .and_then(|signal| signal.upgrade())
            .is_some_and(|signal| signal.disconnect_id(&self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
