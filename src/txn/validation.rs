//! Backward optimistic validation
//!
//! Per PROTOCOL.md §5, the commit-time check at the heart of the
//! protocol. A committing transaction `T` is examined against every
//! transaction that committed strictly after `T` began — the only
//! transactions whose effects `T`'s snapshot could not have seen.
//!
//! Two conflict shapes exist:
//!
//! - **Direct**: a later committer overwrote a key `T` read. Precise.
//! - **Predicate**: a later committer wrote a version whose value — or
//!   whose chain predecessor's value — matches one of `T`'s recorded
//!   moduli, so a row could have entered or left `T`'s query result.
//!   Conservative: rejection does not prove the observed result would
//!   actually have differed, and that imprecision is accepted.
//!
//! The first conflict found ends the scan.

use std::collections::BTreeMap;
use std::fmt;

use crate::mvcc::{Key, Timestamp, Value, VersionChain};

use super::{ActiveTransaction, CommittedTransaction};

/// A conflict that invalidates a committing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// A transaction that committed after this one began wrote a key
    /// this one read.
    DirectRead {
        /// The contested key.
        key: Key,
    },
    /// A later-committed write could have changed a predicate result.
    Predicate {
        /// The key whose new or superseded value matched.
        key: Key,
        /// The recorded modulus that matched.
        modulus: Value,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::DirectRead { key } => {
                write!(f, "key {} was read but overwritten by a later commit", key)
            }
            Conflict::Predicate { key, modulus } => {
                write!(
                    f,
                    "a later commit to key {} disturbed the modulus-{} predicate",
                    key, modulus
                )
            }
        }
    }
}

/// Runs backward validation for `txn`.
///
/// `committed` is the committed table keyed by commit timestamp;
/// `chains` is the version store, needed to resolve written versions
/// and their predecessors. Returns the first conflict found, or `None`
/// when the transaction may commit.
pub fn find_conflict(
    txn: &ActiveTransaction,
    committed: &BTreeMap<Timestamp, CommittedTransaction>,
    chains: &BTreeMap<Key, VersionChain>,
) -> Option<Conflict> {
    // Pure reads cannot conflict: nothing this transaction did needs
    // to be reconciled with later committers.
    if txn.wrote_nothing() {
        return None;
    }

    // Pure writes already serialized through the chain-tail rules
    // (PROTOCOL.md §4); with nothing read and no predicates recorded
    // there is nothing to invalidate.
    if txn.observed_nothing() {
        return None;
    }

    let after_start = committed.range((
        std::ops::Bound::Excluded(txn.start()),
        std::ops::Bound::Unbounded,
    ));

    for (_, later) in after_start {
        for (&key, &seq) in later.writes() {
            if txn.read_keys().contains(&key) {
                return Some(Conflict::DirectRead { key });
            }

            if txn.predicate_moduli().is_empty() {
                continue;
            }

            // Committed versions are never removed, so both lookups
            // succeed for any sealed write set; a miss only means the
            // store was externally disturbed, and the scan moves on.
            let Some(chain) = chains.get(&key) else {
                continue;
            };
            let Some(version) = chain.version(seq) else {
                continue;
            };

            // A predecessor means a row may also have LEFT the result
            // set; a first version can only have entered it.
            let predecessor = chain.predecessor_of(seq);

            for &modulus in txn.predicate_moduli() {
                let entered = version.value() % modulus == 0;
                let left = predecessor.is_some_and(|p| p.value() % modulus == 0);
                if entered || left {
                    return Some(Conflict::Predicate { key, modulus });
                }
            }
        }
    }

    None
}
