//! Database Module
//!
//! In-memory datastore behind a single writer lock. Readers get a consistent
//! snapshot; a transaction runs against a draft copy that replaces the live
//! store only when the closure succeeds.

pub mod repository;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::{DiningTable, Reservation, Restaurant, Shift, Zone};

/// All persisted records, keyed by id
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub restaurants: BTreeMap<i64, Restaurant>,
    pub zones: BTreeMap<i64, Zone>,
    pub tables: BTreeMap<i64, DiningTable>,
    pub shifts: BTreeMap<i64, Shift>,
    pub reservations: BTreeMap<i64, Reservation>,
}

/// Shared handle to the datastore
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    inner: Arc<RwLock<DataStore>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a consistent snapshot
    pub fn read<R>(&self, f: impl FnOnce(&DataStore) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Run `f` with exclusive write access
    ///
    /// Writers are serialized: a check performed inside `f` cannot be
    /// invalidated by a concurrent writer before `f` returns. On `Err` the
    /// draft is discarded and the store is left untouched.
    pub fn transaction<R, E>(
        &self,
        f: impl FnOnce(&mut DataStore) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut guard = self.inner.write();
        let mut draft = guard.clone();
        let result = f(&mut draft)?;
        *guard = draft;
        Ok(result)
    }
}
