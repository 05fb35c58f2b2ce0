//! Snapshot - A transaction's immutable visibility bound
//!
//! Per PROTOCOL.md §3:
//! - Fixed at `begin`, never changes for the life of the transaction
//! - Defined purely in terms of the start timestamp
//! - A committed version is inside the snapshot iff its commit
//!   timestamp is strictly below the bound
//!
//! The bound is exclusive because start and commit timestamps share one
//! sequence (PROTOCOL.md §2): a commit minted after a start is strictly
//! greater, so "strictly below my start" is exactly "committed before I
//! began".
//!
//! This is a PURE TYPE; the resolution logic lives in `visibility`.

use super::Timestamp;

/// A stable snapshot boundary for one transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Snapshot {
    start: Timestamp,
}

impl Snapshot {
    /// Creates the snapshot anchored at a transaction's start timestamp.
    #[inline]
    pub fn at(start: Timestamp) -> Self {
        Self { start }
    }

    /// Returns the exclusive upper bound: commit timestamps strictly
    /// below this are visible.
    #[inline]
    pub fn bound(&self) -> Timestamp {
        self.start
    }

    /// Returns true if a commit at `at` falls inside this snapshot.
    #[inline]
    pub fn admits(&self, at: Timestamp) -> bool {
        at < self.start
    }
}
