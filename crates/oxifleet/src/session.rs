//! Session store.
//!
//! Holds at most one signed-in user profile. Clearing the session removes
//! the persisted key rather than writing `null`, and every `set` writes
//! through and notifies unconditionally — including absent-to-absent
//! transitions (last write wins, always re-render).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::backing::Backing;
use crate::store::{Persist, Store, Subscription};

/// Backing key the session is persisted under.
pub const SESSION_KEY: &str = "oxifleet:session";

/// A signed-in user's profile, password already stripped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Directory id of the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Arbitrary extra profile fields carried along verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Persist for Option<UserProfile> {
    fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<UserProfile>(raw).map(Some)
    }

    fn encode(&self) -> serde_json::Result<Option<String>> {
        // Absent session means absent key
        match self {
            Some(profile) => serde_json::to_string(profile).map(Some),
            None => Ok(None),
        }
    }

    fn fallback() -> Self {
        None
    }
}

/// Observable holder of the current session.
#[derive(Debug)]
pub struct SessionStore {
    store: Store<Option<UserProfile>>,
}

impl SessionStore {
    /// Open the session store, loading any persisted session.
    #[must_use]
    pub fn open(backing: Arc<dyn Backing>) -> Self {
        Self {
            store: Store::open(backing, SESSION_KEY),
        }
    }

    /// Snapshot of the current session, if any.
    #[must_use]
    pub fn get(&self) -> Option<UserProfile> {
        self.store.get()
    }

    /// Replace the session with an owned copy of `user`, or clear it.
    ///
    /// Writes through and notifies on every call, even when the value does
    /// not change.
    pub fn set(&self, user: Option<UserProfile>) {
        self.store.set(user);
    }

    /// Clear the session. Equivalent to `set(None)`.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Register a listener invoked after every `set` or `clear`.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }
}
