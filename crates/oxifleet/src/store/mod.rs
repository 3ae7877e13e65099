//! Generic observable store.
//!
//! A [`Store`] wraps one logical named state bucket: it loads its initial
//! value from the [`Backing`](crate::backing::Backing) exactly once at open,
//! writes through synchronously on every mutation, and then notifies every
//! subscriber synchronously. Backing faults are logged and dropped here —
//! the store prefers silently degraded persistence over user-visible
//! failure, so its operations are infallible to callers.
//!
//! Concurrency model: single logical thread of control. All operations run
//! start-to-finish with no suspension. Listeners run outside the state lock,
//! so a listener may re-enter [`Store::set`] (or subscribe/cancel) during a
//! notification; guarding against infinite loops is the caller's problem.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, warn};

use crate::backing::Backing;

/// Conversion between a store's state and its persisted string form.
///
/// `encode` returning `Ok(None)` means "remove the key" — used by the
/// session store, whose cleared state is represented by key absence rather
/// than a persisted `null`. A serialization error is a distinct outcome:
/// the store logs it and leaves whatever was previously persisted in place.
pub trait Persist: Clone {
    /// Parse a persisted string into a state value.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error; the store degrades to
    /// [`Persist::fallback`] on failure.
    fn decode(raw: &str) -> serde_json::Result<Self>
    where
        Self: Sized;

    /// Serialize this state. `Ok(None)` removes the persisted key.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error; the store skips the
    /// write and keeps the previously persisted value.
    fn encode(&self) -> serde_json::Result<Option<String>>;

    /// The state used when nothing (or something unreadable) is persisted.
    fn fallback() -> Self;
}

type Listener = Arc<dyn Fn() + Send + Sync>;

struct ListenerEntry {
    id: u64,
    callback: Listener,
}

type ListenerList = Mutex<Vec<ListenerEntry>>;

/// Recover a mutex guard even if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-memory state holder with load-once, write-through, and
/// subscriber-notification semantics.
pub struct Store<T> {
    backing: Arc<dyn Backing>,
    key: &'static str,
    value: Mutex<T>,
    listeners: Arc<ListenerList>,
    next_listener_id: AtomicU64,
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Persist> Store<T> {
    /// Open a store bound to `key`, loading the initial value once.
    ///
    /// A present, parseable value is used as-is; absence, a parse failure,
    /// or a read fault all degrade to [`Persist::fallback`].
    #[must_use]
    pub fn open(backing: Arc<dyn Backing>, key: &'static str) -> Self {
        let value = match backing.read(key) {
            Ok(Some(raw)) => T::decode(&raw).unwrap_or_else(|err| {
                warn!(key, %err, "persisted state unreadable, using fallback");
                T::fallback()
            }),
            Ok(None) => T::fallback(),
            Err(err) => {
                debug!(key, %err, "backing read failed, using fallback");
                T::fallback()
            }
        };

        Self {
            backing,
            key,
            value: Mutex::new(value),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Return a cloned snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> T {
        lock(&self.value).clone()
    }

    /// Replace the state, write through, and notify subscribers.
    ///
    /// The in-memory state is swapped first, then the backing write is
    /// attempted (failures are logged and dropped), then every listener runs
    /// synchronously in registration order. Listeners always observe the
    /// fully-updated state, and no notification precedes the write attempt.
    /// When `encode` itself fails, nothing is written or removed; the
    /// previously persisted value stays.
    pub fn set(&self, value: T) {
        let encoded = value.encode();
        {
            let mut guard = lock(&self.value);
            *guard = value;
        }

        match encoded {
            Ok(Some(raw)) => {
                if let Err(err) = self.backing.write(self.key, &raw) {
                    // Availability over durability: the state is already live.
                    warn!(key = self.key, %err, "state not persisted");
                }
            }
            Ok(None) => {
                if let Err(err) = self.backing.delete(self.key) {
                    warn!(key = self.key, %err, "persisted state not removed");
                }
            }
            Err(err) => {
                // Never the remove path: the previously persisted value
                // stays until a later set encodes successfully.
                warn!(key = self.key, %err, "state not serializable, keeping prior persisted value");
            }
        }

        self.notify();
    }

    /// Register a listener, invoked with no arguments after every `set`.
    ///
    /// Listeners run in registration order. The returned handle removes
    /// exactly this listener; cancellation is idempotent and also happens
    /// when the handle is dropped.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push(ListenerEntry {
            id,
            callback: Arc::new(listener),
        });
        Subscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Number of currently registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    fn notify(&self) {
        // Iterate over a snapshot so subscribe/cancel during notification
        // cannot invalidate the cycle. A listener cancelled mid-cycle may
        // still observe this in-flight notification.
        let snapshot: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();
        for callback in snapshot {
            callback();
        }
    }
}

/// Capability to remove one registered listener.
///
/// Cancellation is idempotent; dropping the handle cancels too.
pub struct Subscription {
    listeners: Weak<ListenerList>,
    id: u64,
    cancelled: AtomicBool,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("cancelled", &self.cancelled.load(Ordering::Relaxed))
            .finish()
    }
}

impl Subscription {
    /// Remove the listener this handle was issued for.
    ///
    /// Calling `cancel` more than once is a no-op.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).retain(|entry| entry.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
