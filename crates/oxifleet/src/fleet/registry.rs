//! Append-only record registries.
//!
//! A [`Registry`] is one instantiation of the generic observable store: an
//! ordered list of domain records plus a fixed baseline count modeling
//! pre-existing inventory that is not in the persisted list. Records grow
//! monotonically via [`Registry::add`]; there is no update or delete.

use std::sync::Arc;

use crate::backing::Backing;
use crate::store::{Persist, Store, Subscription};

use super::FleetRecord;

/// State held by a registry: the baseline seed plus the persisted records.
///
/// Only `records` is persisted; `base_count` is a compile-time constant
/// re-applied at every load.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryState<R> {
    /// Pre-existing fleet size not tracked in `records`.
    pub base_count: usize,
    /// Insertion-ordered records.
    pub records: Vec<R>,
}

impl<R: FleetRecord> Persist for RegistryState<R> {
    fn decode(raw: &str) -> serde_json::Result<Self> {
        // Persisted form is the record array alone; anything else (including
        // a non-array) degrades to the fallback.
        let records: Vec<R> = serde_json::from_str(raw)?;
        Ok(Self {
            base_count: R::BASE_COUNT,
            records,
        })
    }

    fn encode(&self) -> serde_json::Result<Option<String>> {
        serde_json::to_string(&self.records).map(Some)
    }

    fn fallback() -> Self {
        Self {
            base_count: R::BASE_COUNT,
            records: Vec::new(),
        }
    }
}

/// An observable, append-only registry of fleet records.
#[derive(Debug)]
pub struct Registry<R: FleetRecord> {
    store: Store<RegistryState<R>>,
}

impl<R: FleetRecord> Registry<R> {
    /// Open the registry over its backing key, loading persisted records.
    #[must_use]
    pub fn open(backing: Arc<dyn Backing>) -> Self {
        Self {
            store: Store::open(backing, R::STORAGE_KEY),
        }
    }

    /// Snapshot of the full registry state.
    #[must_use]
    pub fn state(&self) -> RegistryState<R> {
        self.store.get()
    }

    /// Snapshot of the persisted records, in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<R> {
        self.store.get().records
    }

    /// Total fleet size shown to consumers: baseline plus tracked records.
    #[must_use]
    pub fn total(&self) -> usize {
        let state = self.store.get();
        state.base_count + state.records.len()
    }

    /// Normalize a draft into a record, append it, and return it.
    ///
    /// The draft is trimmed and defaulted per the record's policy, stamped
    /// with the current instant, and appended as-is. A caller-supplied id
    /// that collides with an existing record is stored silently; there is
    /// no uniqueness check.
    pub fn add(&self, draft: R::Draft) -> R {
        let record = R::from_draft(draft);

        let mut state = self.store.get();
        state.records.push(record.clone());
        self.store.set(state);

        record
    }

    /// Register a listener invoked after every `add`.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }
}
