//! TimestampAuthority - The store's single ordering authority
//!
//! Per PROTOCOL.md §2:
//! - One counter mints BOTH start timestamps and commit timestamps,
//!   so the two kinds of event fall into one strict total order (T1)
//! - Transaction identities come from a second counter biased into a
//!   high range, numerically disjoint from every timestamp (T2)
//! - No clock usage: ordering is logical and deterministic
//!
//! The authority owns plain counters behind `&mut self`; atomicity with
//! respect to concurrent callers comes from the store's critical section
//! (PROTOCOL.md §7), not from the counters themselves.

use super::{Timestamp, TxnId};

/// The first transaction identity sits above this base, far outside any
/// plausible timestamp range.
const TXN_ID_BASE: u64 = 1 << 62;

/// Mints timestamps and transaction identities for one store.
#[derive(Debug)]
pub struct TimestampAuthority {
    clock: u64,
    next_txn_id: u64,
}

impl TimestampAuthority {
    /// Creates a fresh authority: no timestamps minted, no identities
    /// handed out.
    pub fn new() -> Self {
        Self {
            clock: 0,
            next_txn_id: TXN_ID_BASE,
        }
    }

    /// Mints the next timestamp.
    ///
    /// Used for start timestamps at `begin` and commit timestamps at
    /// `commit` alike. A commit that aborts after minting leaves a gap
    /// in the sequence; consumers must not assume contiguity.
    pub fn mint_timestamp(&mut self) -> Timestamp {
        self.clock += 1;
        Timestamp::new(self.clock)
    }

    /// Mints the next transaction identity.
    pub fn mint_txn_id(&mut self) -> TxnId {
        self.next_txn_id += 1;
        TxnId::new(self.next_txn_id)
    }

    /// Returns the highest timestamp minted so far.
    pub fn highest_timestamp(&self) -> Option<Timestamp> {
        if self.clock == 0 {
            None
        } else {
            Some(Timestamp::new(self.clock))
        }
    }
}

impl Default for TimestampAuthority {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_authority_has_minted_nothing() {
        let authority = TimestampAuthority::new();
        assert!(authority.highest_timestamp().is_none());
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let mut authority = TimestampAuthority::new();

        let a = authority.mint_timestamp();
        let b = authority.mint_timestamp();
        let c = authority.mint_timestamp();

        assert!(a < b);
        assert!(b < c);
        assert_eq!(authority.highest_timestamp(), Some(c));
    }

    #[test]
    fn test_shared_sequence_interleaves_starts_and_commits() {
        // Start and commit timestamps come from the same counter, so a
        // commit minted after a start is strictly greater than it.
        let mut authority = TimestampAuthority::new();

        let start = authority.mint_timestamp();
        let commit = authority.mint_timestamp();
        let later_start = authority.mint_timestamp();

        assert!(start < commit);
        assert!(commit < later_start);
    }

    #[test]
    fn test_txn_ids_strictly_increase() {
        let mut authority = TimestampAuthority::new();

        let a = authority.mint_txn_id();
        let b = authority.mint_txn_id();

        assert!(a < b);
    }

    #[test]
    fn test_identity_and_timestamp_spaces_are_disjoint() {
        let mut authority = TimestampAuthority::new();

        let id = authority.mint_txn_id();
        let ts = authority.mint_timestamp();

        assert!(id.value() > TXN_ID_BASE);
        assert!(ts.value() < TXN_ID_BASE);
    }

    #[test]
    fn test_deterministic_sequences() {
        let mut a1 = TimestampAuthority::new();
        let mut a2 = TimestampAuthority::new();

        for _ in 0..5 {
            assert_eq!(a1.mint_timestamp(), a2.mint_timestamp());
            assert_eq!(a1.mint_txn_id(), a2.mint_txn_id());
        }
    }
}
