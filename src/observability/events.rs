//! Observable store events
//!
//! Per OBSERVABILITY.md, the engine emits typed lifecycle events;
//! free-form event strings are reserved for tests.

use std::fmt;

/// Observable events in the store's transaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A transaction began.
    TxnBegin,
    /// A transaction validated and committed.
    TxnCommit,
    /// A transaction was rolled back, explicitly or as a failure side
    /// effect.
    TxnRollback,
    /// Commit-time validation rejected a transaction.
    ValidationFailed,
    /// A write was refused because of a foreign uncommitted version.
    WriteConflict,
    /// A write was refused because a newer committed version exists.
    WriteRefused,
    /// A predicate query completed.
    QueryComplete,
    /// A predicate query was rejected before touching any version.
    QueryRejected,
    /// A version was asked to commit twice (FATAL, invariant V1).
    VersionRecommit,
}

impl Event {
    /// Returns the canonical event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TxnBegin => "TXN_BEGIN",
            Event::TxnCommit => "TXN_COMMIT",
            Event::TxnRollback => "TXN_ROLLBACK",
            Event::ValidationFailed => "TXN_VALIDATION_FAILED",
            Event::WriteConflict => "WRITE_CONFLICT",
            Event::WriteRefused => "WRITE_REFUSED",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::VersionRecommit => "VERSION_RECOMMIT",
        }
    }

    /// Returns true if the event indicates a broken internal invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::VersionRecommit)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
