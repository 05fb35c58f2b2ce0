//! Version - A single timestamped value for a key
//!
//! Per PROTOCOL.md §1:
//! - Every write creates a version: the written value plus a state
//! - Provisional versions are owned by exactly one in-flight transaction
//! - The provisional → committed transition happens exactly once (V1)
//!
//! The value never changes after construction; the only permitted
//! mutation is the one-way commit stamping.

use std::fmt;

use super::{Timestamp, TxnId, Value};

/// The lifecycle state of a version.
///
/// Per PROTOCOL.md §1, the state encodes ownership while provisional and
/// the commit timestamp once committed; there is no third state and no
/// way back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VersionState {
    /// Created by a still-active transaction; visible only to its owner.
    Provisional {
        /// The transaction that created this version.
        owner: TxnId,
    },
    /// Stamped at commit; visible to every later snapshot.
    Committed {
        /// The commit timestamp assigned when the owner committed.
        at: Timestamp,
    },
}

/// A single version of a key's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Version {
    value: Value,
    state: VersionState,
}

impl Version {
    /// Creates a provisional version owned by `owner`.
    ///
    /// This is the only constructor: every version starts provisional
    /// and becomes committed through [`Version::commit`].
    pub fn provisional(owner: TxnId, value: Value) -> Self {
        Self {
            value,
            state: VersionState::Provisional { owner },
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    /// Returns the lifecycle state.
    #[inline]
    pub fn state(&self) -> VersionState {
        self.state
    }

    /// Returns true once the version has been stamped with a commit
    /// timestamp.
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self.state, VersionState::Committed { .. })
    }

    /// Returns the owning transaction while provisional.
    #[inline]
    pub fn owner(&self) -> Option<TxnId> {
        match self.state {
            VersionState::Provisional { owner } => Some(owner),
            VersionState::Committed { .. } => None,
        }
    }

    /// Returns the commit timestamp once committed.
    #[inline]
    pub fn commit_timestamp(&self) -> Option<Timestamp> {
        match self.state {
            VersionState::Provisional { .. } => None,
            VersionState::Committed { at } => Some(at),
        }
    }

    /// Stamps the version with its commit timestamp.
    ///
    /// Per PROTOCOL.md §1 (V1) this transition is one-way and happens
    /// exactly once; a second call is an invariant violation.
    pub fn commit(&mut self, at: Timestamp) -> Result<(), VersionError> {
        match self.state {
            VersionState::Provisional { .. } => {
                self.state = VersionState::Committed { at };
                Ok(())
            }
            VersionState::Committed { at: already } => Err(VersionError::AlreadyCommitted {
                value: self.value,
                at: already,
            }),
        }
    }
}

/// Errors from version state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The version had already been stamped with a commit timestamp.
    AlreadyCommitted {
        /// The stored value, for diagnostics.
        value: Value,
        /// The timestamp of the earlier commit.
        at: Timestamp,
    },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::AlreadyCommitted { value, at } => {
                write!(
                    f,
                    "version holding {} had already committed at timestamp {}",
                    value, at
                )
            }
        }
    }
}

impl std::error::Error for VersionError {}
