//! SharedStore - the serialized multi-caller facade
//!
//! Per PROTOCOL.md §7, none of the store's algorithms are lock-free:
//! the tail classification in `write`, the table moves in
//! `commit`/`rollback`, and the timestamp counter must be atomic with
//! respect to one another. `SharedStore` makes them so with a single
//! global critical section — one mutex around the whole store, taken
//! for the full duration of every operation. There is no per-key
//! locking and no finer granularity to reason about.
//!
//! Handles are cheap to clone; clones share the same store.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::mvcc::{Key, TxnId, Value};
use crate::observability::MetricsSnapshot;

use super::{Store, StoreConfig, StoreResult};

/// A cloneable, thread-safe handle to one store.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Creates a shared store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a shared store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Store::with_config(config))),
        }
    }

    /// Begins a transaction. See [`Store::begin`].
    pub fn begin(&self) -> TxnId {
        self.inner.lock().begin()
    }

    /// Reads a key under the transaction's snapshot. See [`Store::read`].
    pub fn read(&self, xact: TxnId, key: Key) -> StoreResult<Value> {
        self.inner.lock().read(xact, key)
    }

    /// Runs the modulus predicate query. See [`Store::modquery`].
    pub fn modquery(&self, xact: TxnId, modulus: Value) -> StoreResult<Vec<Value>> {
        self.inner.lock().modquery(xact, modulus)
    }

    /// Updates or inserts a key. See [`Store::write`].
    pub fn write(&self, xact: TxnId, key: Key, value: Value) -> StoreResult<()> {
        self.inner.lock().write(xact, key, value)
    }

    /// Always refused. See [`Store::delete`].
    pub fn delete(&self, xact: TxnId, key: Key) -> StoreResult<()> {
        self.inner.lock().delete(xact, key)
    }

    /// Commits a transaction. See [`Store::commit`].
    pub fn commit(&self, xact: TxnId) -> StoreResult<()> {
        self.inner.lock().commit(xact)
    }

    /// Rolls a transaction back. See [`Store::rollback`].
    pub fn rollback(&self, xact: TxnId) -> StoreResult<()> {
        self.inner.lock().rollback(xact)
    }

    /// Returns true while the transaction is active.
    pub fn is_active(&self, xact: TxnId) -> bool {
        self.inner.lock().is_active(xact)
    }

    /// Returns a point-in-time copy of the operational counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().metrics()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}
