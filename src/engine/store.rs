//! Store engine - the operation surface
//!
//! Per PROTOCOL.md §3-§6, the engine orchestrates the pieces the `mvcc`
//! and `txn` modules define:
//!
//! - looks up or lazily creates version chains
//! - applies the visibility rule on the read path (own undo-buffer
//!   version first, committed chain second)
//! - classifies chain tails on the write path and enforces write-write
//!   exclusion (V2)
//! - drives commit: validate, stamp, publish — or roll back completely
//!
//! The engine owns all shared state explicitly (chains, the two
//! transaction tables, the timestamp authority, metrics); there is no
//! process-global singleton. One `Store` assumes one caller at a time;
//! `SharedStore` provides the serialized multi-caller form
//! (PROTOCOL.md §7).

use std::collections::{BTreeMap, HashMap};

use crate::mvcc::{
    Key, Timestamp, TimestampAuthority, TxnId, Value, Version, VersionChain, VersionSeq,
    Visibility,
};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::txn::{find_conflict, ActiveTransaction, CommittedTransaction};

use super::{StoreConfig, StoreError, StoreResult};

/// The outcome of classifying a chain tail for a write.
///
/// Per PROTOCOL.md §4 the cases are checked in this order; exactly one
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteCase {
    /// A committed version newer than the writer's snapshot exists.
    TooLate,
    /// Empty chain or committed tail at/below the writer's start.
    Insert,
    /// The tail is this writer's own provisional version.
    Overwrite(VersionSeq),
    /// The tail is another transaction's provisional version.
    ForeignConflict,
}

/// Classifies a write against the chain tail.
fn classify_write(
    tail: Option<(VersionSeq, &Version)>,
    start: Timestamp,
    own_prior: Option<VersionSeq>,
) -> WriteCase {
    match tail {
        None => WriteCase::Insert,
        Some((_, version)) if version.is_committed() => match version.commit_timestamp() {
            Some(at) if at > start => WriteCase::TooLate,
            _ => WriteCase::Insert,
        },
        Some((seq, _)) => match own_prior {
            Some(prior) if prior == seq => WriteCase::Overwrite(seq),
            _ => WriteCase::ForeignConflict,
        },
    }
}

/// Resolves the value of `key` visible to `txn`, given its chain.
///
/// The transaction's own provisional version shadows the committed
/// chain (read-your-own-writes); otherwise the snapshot rule applies.
fn visible_value(chain: &VersionChain, txn: &ActiveTransaction, key: Key) -> Option<Value> {
    if let Some(seq) = txn.written(key) {
        return chain.version(seq).map(|v| v.value());
    }
    Visibility::visible_version(chain, txn.snapshot())
        .version()
        .map(|v| v.value())
}

/// An in-memory key-value store with optimistic multi-version
/// concurrency control.
///
/// Keys and values are `i64`. Point reads, a modulus predicate query,
/// blind writes, and the begin/commit/rollback lifecycle; snapshot
/// isolation with backward validation at commit. See PROTOCOL.md.
#[derive(Debug)]
pub struct Store {
    /// One version chain per key ever written. Chains persist for the
    /// lifetime of the store, even when rollback empties them.
    chains: BTreeMap<Key, VersionChain>,
    /// In-flight transactions, keyed by transaction id.
    active: HashMap<TxnId, ActiveTransaction>,
    /// Committed transactions, keyed by their final commit timestamp.
    committed: BTreeMap<Timestamp, CommittedTransaction>,
    authority: TimestampAuthority,
    config: StoreConfig,
    metrics: MetricsRegistry,
}

impl Store {
    /// Creates an empty store with the default (relaxed) configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            chains: BTreeMap::new(),
            active: HashMap::new(),
            committed: BTreeMap::new(),
            authority: TimestampAuthority::new(),
            config,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Begins a transaction and returns its handle.
    ///
    /// Mints the start timestamp and the identity from the authority
    /// (PROTOCOL.md §2) and registers the record as active. Cannot fail.
    pub fn begin(&mut self) -> TxnId {
        let start = self.authority.mint_timestamp();
        let id = self.authority.mint_txn_id();
        self.active.insert(id, ActiveTransaction::new(id, start));

        self.metrics.record_begin();
        let txn_s = id.to_string();
        let start_s = start.to_string();
        log_event_with_fields(Event::TxnBegin, &[("txn", &txn_s), ("start_ts", &start_s)]);

        id
    }

    /// Reads the value of `key` visible to `xact`'s snapshot.
    ///
    /// Successful resolution records the key in the transaction's read
    /// set for commit-time validation. `KeyNotFound` leaves the
    /// transaction active.
    pub fn read(&mut self, xact: TxnId, key: Key) -> StoreResult<Value> {
        let txn = self
            .active
            .get_mut(&xact)
            .ok_or(StoreError::UnknownTransaction { xact })?;

        let value = match self.chains.get(&key) {
            Some(chain) => visible_value(chain, txn, key),
            None => None,
        };

        match value {
            Some(value) => {
                txn.record_read(key);
                self.metrics.record_read();
                Ok(value)
            }
            None => Err(StoreError::KeyNotFound { key }),
        }
    }

    /// Returns every visible value divisible by `modulus`, in ascending
    /// key order.
    ///
    /// The modulus is recorded for validation whether or not any row
    /// qualifies — an empty result is still a predicate observation
    /// (PROTOCOL.md §3). A zero modulus rolls the transaction back
    /// before the error is surfaced.
    pub fn modquery(&mut self, xact: TxnId, modulus: Value) -> StoreResult<Vec<Value>> {
        let txn = self
            .active
            .get_mut(&xact)
            .ok_or(StoreError::UnknownTransaction { xact })?;

        if modulus == 0 {
            if let Some(record) = self.active.remove(&xact) {
                self.rollback_record(&record);
            }
            self.metrics.record_query_rejected();
            let txn_s = xact.to_string();
            log_event_with_fields(Event::QueryRejected, &[("txn", &txn_s), ("modulus", "0")]);
            return Err(StoreError::DivisionByZero { xact });
        }

        txn.record_predicate(modulus);

        let mut result = Vec::new();
        for (&key, chain) in &self.chains {
            if let Some(value) = visible_value(chain, txn, key) {
                if value % modulus == 0 {
                    result.push(value);
                }
            }
        }

        self.metrics.record_query();
        Ok(result)
    }

    /// Updates or inserts `key` with `value` in `xact`.
    ///
    /// Chain-tail classification per PROTOCOL.md §4. A foreign
    /// provisional tail rolls this transaction back; a newer committed
    /// tail refuses the write and, under the strict policy only, rolls
    /// back as well.
    pub fn write(&mut self, xact: TxnId, key: Key, value: Value) -> StoreResult<()> {
        let txn = self
            .active
            .get(&xact)
            .ok_or(StoreError::UnknownTransaction { xact })?;
        let owner = txn.id();
        let start = txn.start();
        let own_prior = txn.written(key);

        let tail = self.chains.get(&key).and_then(|chain| chain.tail_entry());
        match classify_write(tail, start, own_prior) {
            WriteCase::TooLate => {
                self.metrics.record_write_conflict();
                let txn_s = xact.to_string();
                let key_s = key.to_string();
                log_event_with_fields(Event::WriteRefused, &[("txn", &txn_s), ("key", &key_s)]);

                if self.config.strict_write_conflicts() {
                    if let Some(record) = self.active.remove(&xact) {
                        self.rollback_record(&record);
                    }
                }
                Err(StoreError::WriteTooLate { key })
            }
            WriteCase::Insert => {
                let chain = self.chains.entry(key).or_default();
                let seq = chain.append(Version::provisional(owner, value));
                if let Some(txn) = self.active.get_mut(&xact) {
                    txn.record_write(key, seq);
                }
                self.metrics.record_write();
                Ok(())
            }
            WriteCase::Overwrite(prior) => {
                let chain = self.chains.entry(key).or_default();
                chain.remove(prior);
                let seq = chain.append(Version::provisional(owner, value));
                if let Some(txn) = self.active.get_mut(&xact) {
                    txn.record_write(key, seq);
                }
                self.metrics.record_write();
                Ok(())
            }
            WriteCase::ForeignConflict => {
                self.metrics.record_write_conflict();
                let txn_s = xact.to_string();
                let key_s = key.to_string();
                log_event_with_fields(Event::WriteConflict, &[("txn", &txn_s), ("key", &key_s)]);

                if let Some(record) = self.active.remove(&xact) {
                    self.rollback_record(&record);
                }
                Err(StoreError::UncommittedConflict { key })
            }
        }
    }

    /// Deletion is not part of this store's protocol.
    ///
    /// A future extension could model it as a tombstone version subject
    /// to the same visibility and write rules; until then every call is
    /// refused.
    pub fn delete(&mut self, _xact: TxnId, _key: Key) -> StoreResult<()> {
        Err(StoreError::NotSupported {
            operation: "delete",
        })
    }

    /// Commits `xact`: validate, stamp, publish.
    ///
    /// The record leaves the active table before anything else happens,
    /// so the failure paths below can never resolve — or roll back —
    /// the same transaction twice. On any failure the transaction's
    /// writes are fully undone before the error is surfaced
    /// (PROTOCOL.md §5, §6).
    pub fn commit(&mut self, xact: TxnId) -> StoreResult<()> {
        let record = self
            .active
            .remove(&xact)
            .ok_or(StoreError::UnknownTransaction { xact })?;

        if let Some(conflict) = find_conflict(&record, &self.committed, &self.chains) {
            self.metrics.record_validation_failure();
            let txn_s = xact.to_string();
            let conflict_s = conflict.to_string();
            log_event_with_fields(
                Event::ValidationFailed,
                &[("txn", &txn_s), ("conflict", &conflict_s)],
            );

            self.rollback_record(&record);
            return Err(StoreError::ValidationFailed { xact });
        }

        let commit_ts = self.authority.mint_timestamp();
        for (&key, &seq) in record.writes() {
            let stamped = self
                .chains
                .get_mut(&key)
                .and_then(|chain| chain.version_mut(seq))
                .map(|version| version.commit(commit_ts));

            if !matches!(stamped, Some(Ok(()))) {
                let txn_s = xact.to_string();
                let key_s = key.to_string();
                log_event_with_fields(
                    Event::VersionRecommit,
                    &[("txn", &txn_s), ("key", &key_s)],
                );

                self.rollback_record(&record);
                return Err(StoreError::AlreadyCommitted { key });
            }
        }

        let txn_s = xact.to_string();
        let commit_s = commit_ts.to_string();
        self.committed
            .insert(commit_ts, CommittedTransaction::seal(commit_ts, record));

        self.metrics.record_commit();
        log_event_with_fields(
            Event::TxnCommit,
            &[("txn", &txn_s), ("commit_ts", &commit_s)],
        );
        Ok(())
    }

    /// Rolls `xact` back: every version it created leaves its chain,
    /// and the record is dropped.
    pub fn rollback(&mut self, xact: TxnId) -> StoreResult<()> {
        let record = self
            .active
            .remove(&xact)
            .ok_or(StoreError::UnknownTransaction { xact })?;
        self.rollback_record(&record);
        Ok(())
    }

    /// Undoes a record already removed from the active table.
    ///
    /// Removal is by stable chain handle, so exactly the versions this
    /// transaction created disappear. Chains persist even when emptied
    /// (PROTOCOL.md §1).
    fn rollback_record(&mut self, record: &ActiveTransaction) {
        for (&key, &seq) in record.writes() {
            if let Some(chain) = self.chains.get_mut(&key) {
                chain.remove(seq);
            }
        }

        self.metrics.record_rollback();
        let txn_s = record.id().to_string();
        log_event_with_fields(Event::TxnRollback, &[("txn", &txn_s)]);
    }

    /// Returns true while `xact` is in the active table.
    pub fn is_active(&self, xact: TxnId) -> bool {
        self.active.contains_key(&xact)
    }

    /// Returns the number of in-flight transactions.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of committed transactions.
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Returns the commit timestamps in commit order.
    pub fn commit_timestamps(&self) -> Vec<Timestamp> {
        self.committed.keys().copied().collect()
    }

    /// Returns how many versions `key`'s chain currently holds.
    pub fn version_count(&self, key: Key) -> usize {
        self.chains.get(&key).map_or(0, |chain| chain.len())
    }

    /// Returns the store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns a point-in-time copy of the operational counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
