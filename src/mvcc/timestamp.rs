//! Timestamp and TxnId - Totally ordered store identities
//!
//! Per PROTOCOL.md §2:
//! - One sequence totally orders all start and commit events
//! - Transaction identities live in a disjoint numeric range (T2)
//! - Neither depends on wall-clock time
//!
//! These are PURE TYPES with no behavior beyond construction and access.
//! Minting lives in the TimestampAuthority.

use std::fmt;

/// A totally ordered logical timestamp.
///
/// Per PROTOCOL.md §2, start timestamps and commit timestamps are drawn
/// from the same sequence, so any two timestamps in the store compare
/// meaningfully and no two events share one (T1).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp with the given value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    ///
    /// Exists for logging and debugging; application code should not
    /// depend on the internal representation.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque transaction identity.
///
/// Per PROTOCOL.md §2 (T2), identities are biased into a high numeric
/// range so an id can never be mistaken for a timestamp when the two are
/// compared or logged side by side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TxnId(u64);

impl TxnId {
    /// Creates a transaction id with the given value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
