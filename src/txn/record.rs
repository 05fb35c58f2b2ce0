//! Transaction records - Active and committed forms
//!
//! Per PROTOCOL.md §5, a transaction record exists in exactly one of two
//! shapes:
//!
//! - [`ActiveTransaction`] - mutable while in flight, indexed by
//!   transaction id in the active table; accumulates the read set, the
//!   predicate-moduli set, and the undo buffer
//! - [`CommittedTransaction`] - immutable, indexed by its final commit
//!   timestamp in the committed table
//!
//! Commit constructs a fresh committed record from the active one rather
//! than mutating an identity field in place; the two shapes cannot alias
//! and an id can never be observed mid-reassignment.
//!
//! The undo buffer maps each written key to the stable chain handle of
//! the version this transaction created — one entry per key, updated in
//! place when the transaction overwrites its own provisional version.

use std::collections::{HashMap, HashSet};

use crate::mvcc::{Key, Snapshot, Timestamp, TxnId, Value, VersionSeq};

/// A transaction that has begun and not yet committed or rolled back.
#[derive(Debug, Clone)]
pub struct ActiveTransaction {
    id: TxnId,
    start: Timestamp,
    read_keys: HashSet<Key>,
    predicate_moduli: HashSet<Value>,
    undo: HashMap<Key, VersionSeq>,
}

impl ActiveTransaction {
    /// Creates the record minted by `begin`.
    pub fn new(id: TxnId, start: Timestamp) -> Self {
        Self {
            id,
            start,
            read_keys: HashSet::new(),
            predicate_moduli: HashSet::new(),
            undo: HashMap::new(),
        }
    }

    /// Returns the transaction's external identity.
    #[inline]
    pub fn id(&self) -> TxnId {
        self.id
    }

    /// Returns the immutable start timestamp.
    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the visibility bound fixed at `begin`.
    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::at(self.start)
    }

    /// Records a successfully resolved point read.
    pub fn record_read(&mut self, key: Key) {
        self.read_keys.insert(key);
    }

    /// Records a predicate query's modulus.
    ///
    /// Recorded whether or not any row qualified: an empty result is
    /// still a predicate observation (PROTOCOL.md §3).
    pub fn record_predicate(&mut self, modulus: Value) {
        self.predicate_moduli.insert(modulus);
    }

    /// Records the chain handle of a version this transaction created,
    /// replacing any earlier handle for the same key.
    pub fn record_write(&mut self, key: Key, seq: VersionSeq) {
        self.undo.insert(key, seq);
    }

    /// Returns the handle of this transaction's own version of `key`,
    /// if it wrote one.
    pub fn written(&self, key: Key) -> Option<VersionSeq> {
        self.undo.get(&key).copied()
    }

    /// Returns the keys this transaction has read.
    #[inline]
    pub fn read_keys(&self) -> &HashSet<Key> {
        &self.read_keys
    }

    /// Returns the moduli this transaction has queried.
    #[inline]
    pub fn predicate_moduli(&self) -> &HashSet<Value> {
        &self.predicate_moduli
    }

    /// Returns the undo buffer: written key → chain handle.
    #[inline]
    pub fn writes(&self) -> &HashMap<Key, VersionSeq> {
        &self.undo
    }

    /// True if the transaction created no versions.
    #[inline]
    pub fn wrote_nothing(&self) -> bool {
        self.undo.is_empty()
    }

    /// True if the transaction neither read a key nor recorded a
    /// predicate modulus.
    #[inline]
    pub fn observed_nothing(&self) -> bool {
        self.read_keys.is_empty() && self.predicate_moduli.is_empty()
    }
}

/// The immutable record of a committed transaction.
///
/// Keeps exactly what later validations need: when the transaction
/// committed, when it started, and which versions it wrote.
#[derive(Debug, Clone)]
pub struct CommittedTransaction {
    commit: Timestamp,
    start: Timestamp,
    writes: HashMap<Key, VersionSeq>,
}

impl CommittedTransaction {
    /// Seals an active record under its freshly minted commit timestamp.
    pub fn seal(commit: Timestamp, active: ActiveTransaction) -> Self {
        Self {
            commit,
            start: active.start,
            writes: active.undo,
        }
    }

    /// Returns the final commit timestamp — the record's identity in
    /// the committed table.
    #[inline]
    pub fn commit_timestamp(&self) -> Timestamp {
        self.commit
    }

    /// Returns the start timestamp the transaction ran under.
    #[inline]
    pub fn start_timestamp(&self) -> Timestamp {
        self.start
    }

    /// Returns the write set: key → chain handle of the stamped version.
    #[inline]
    pub fn writes(&self) -> &HashMap<Key, VersionSeq> {
        &self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvcc::{Version, VersionChain};

    fn record() -> ActiveTransaction {
        ActiveTransaction::new(TxnId::new((1 << 62) + 1), Timestamp::new(1))
    }

    #[test]
    fn test_fresh_record_observed_and_wrote_nothing() {
        let txn = record();

        assert!(txn.wrote_nothing());
        assert!(txn.observed_nothing());
        assert_eq!(txn.snapshot().bound(), Timestamp::new(1));
    }

    #[test]
    fn test_read_set_accumulates() {
        let mut txn = record();
        txn.record_read(5);
        txn.record_read(7);
        txn.record_read(5);

        assert_eq!(txn.read_keys().len(), 2);
        assert!(!txn.observed_nothing());
    }

    #[test]
    fn test_predicate_moduli_accumulate() {
        let mut txn = record();
        txn.record_predicate(4);

        assert!(txn.predicate_moduli().contains(&4));
        assert!(!txn.observed_nothing());
        assert!(txn.wrote_nothing());
    }

    #[test]
    fn test_undo_buffer_keeps_one_entry_per_key() {
        let mut chain = VersionChain::new();
        let s1 = chain.append(Version::provisional(TxnId::new((1 << 62) + 1), 10));
        let s2 = chain.append(Version::provisional(TxnId::new((1 << 62) + 1), 20));

        let mut txn = record();
        txn.record_write(5, s1);
        txn.record_write(5, s2);

        assert_eq!(txn.writes().len(), 1);
        assert_eq!(txn.written(5), Some(s2));
        assert_eq!(txn.written(6), None);
    }

    #[test]
    fn test_seal_transfers_write_set() {
        let mut chain = VersionChain::new();
        let seq = chain.append(Version::provisional(TxnId::new((1 << 62) + 1), 10));

        let mut txn = record();
        txn.record_write(5, seq);
        txn.record_read(9);

        let sealed = CommittedTransaction::seal(Timestamp::new(4), txn);

        assert_eq!(sealed.commit_timestamp(), Timestamp::new(4));
        assert_eq!(sealed.start_timestamp(), Timestamp::new(1));
        assert_eq!(sealed.writes().get(&5), Some(&seq));
    }
}
