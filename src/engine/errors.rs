//! Store error taxonomy following the ERRORS.md specification
//!
//! Every failure carries a stable `OPTI_*` code, a severity, and an
//! abort classification. Per ERRORS.md:
//! - Errors are synchronous; nothing is swallowed or retried
//! - When a failure rolls the transaction back, the rollback completes
//!   before the error is returned
//! - `OPTI_VERSION_RECOMMIT` is the only FATAL code: it means invariant
//!   V1 broke and the state can no longer be trusted

use std::fmt;

use thiserror::Error;

use crate::mvcc::{Key, TxnId};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Severity levels as defined in ERRORS.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation fails; the store continues.
    Error,
    /// An internal invariant broke; the state is no longer trustworthy.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Every way a store operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The transaction is not in the active table: never begun, already
    /// committed, or already rolled back.
    #[error("transaction {xact} does not exist, has not started, or has already terminated")]
    UnknownTransaction {
        /// The unrecognized handle.
        xact: TxnId,
    },

    /// A point read found no visible version under the snapshot.
    #[error("no visible value for key {key}")]
    KeyNotFound {
        /// The key with nothing visible.
        key: Key,
    },

    /// A predicate query was issued with modulus zero.
    #[error("modulus 0 in predicate query from transaction {xact}")]
    DivisionByZero {
        /// The transaction that was rolled back as a result.
        xact: TxnId,
    },

    /// A committed version newer than the writer's snapshot exists.
    #[error("a newer committed version exists for key {key}")]
    WriteTooLate {
        /// The contested key.
        key: Key,
    },

    /// Another in-flight transaction owns a provisional version.
    #[error("uncommitted version owned by another transaction exists for key {key}")]
    UncommittedConflict {
        /// The contested key.
        key: Key,
    },

    /// Commit-time validation found a conflict.
    #[error("transaction {xact} failed commit-time validation")]
    ValidationFailed {
        /// The transaction that was rolled back as a result.
        xact: TxnId,
    },

    /// The operation is not supported by this store.
    #[error("{operation} is not supported")]
    NotSupported {
        /// The refused operation.
        operation: &'static str,
    },

    /// Internal guard: a version was asked to commit twice, or a
    /// version being stamped went missing from its chain.
    #[error("version for key {key} was already committed or lost before stamping")]
    AlreadyCommitted {
        /// The key whose version broke invariant V1.
        key: Key,
    },
}

impl StoreError {
    /// Returns the stable string code as defined in ERRORS.md.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::UnknownTransaction { .. } => "OPTI_TXN_UNKNOWN",
            StoreError::KeyNotFound { .. } => "OPTI_READ_KEY_NOT_FOUND",
            StoreError::DivisionByZero { .. } => "OPTI_QUERY_ZERO_MODULUS",
            StoreError::WriteTooLate { .. } => "OPTI_WRITE_TOO_LATE",
            StoreError::UncommittedConflict { .. } => "OPTI_WRITE_UNCOMMITTED",
            StoreError::ValidationFailed { .. } => "OPTI_TXN_VALIDATION_FAILED",
            StoreError::NotSupported { .. } => "OPTI_OP_UNSUPPORTED",
            StoreError::AlreadyCommitted { .. } => "OPTI_VERSION_RECOMMIT",
        }
    }

    /// Returns the severity for this error.
    pub fn severity(&self) -> Severity {
        match self {
            StoreError::AlreadyCommitted { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Returns true if the store rolled the transaction back before
    /// surfacing this error.
    ///
    /// `WriteTooLate` reports false here: under the default policy the
    /// transaction stays active, and the strict policy is a
    /// [`StoreConfig`](super::StoreConfig) choice rather than a
    /// property of the error itself.
    pub fn aborts_transaction(&self) -> bool {
        matches!(
            self,
            StoreError::DivisionByZero { .. }
                | StoreError::UncommittedConflict { .. }
                | StoreError::ValidationFailed { .. }
                | StoreError::AlreadyCommitted { .. }
        )
    }

    /// Returns true if this error is fatal.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xact() -> TxnId {
        TxnId::new((1 << 62) + 1)
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            StoreError::UnknownTransaction { xact: xact() }.code(),
            "OPTI_TXN_UNKNOWN"
        );
        assert_eq!(
            StoreError::KeyNotFound { key: 5 }.code(),
            "OPTI_READ_KEY_NOT_FOUND"
        );
        assert_eq!(
            StoreError::DivisionByZero { xact: xact() }.code(),
            "OPTI_QUERY_ZERO_MODULUS"
        );
        assert_eq!(
            StoreError::WriteTooLate { key: 5 }.code(),
            "OPTI_WRITE_TOO_LATE"
        );
        assert_eq!(
            StoreError::UncommittedConflict { key: 5 }.code(),
            "OPTI_WRITE_UNCOMMITTED"
        );
        assert_eq!(
            StoreError::ValidationFailed { xact: xact() }.code(),
            "OPTI_TXN_VALIDATION_FAILED"
        );
        assert_eq!(
            StoreError::NotSupported { operation: "delete" }.code(),
            "OPTI_OP_UNSUPPORTED"
        );
        assert_eq!(
            StoreError::AlreadyCommitted { key: 5 }.code(),
            "OPTI_VERSION_RECOMMIT"
        );
    }

    #[test]
    fn test_only_recommit_is_fatal() {
        assert!(StoreError::AlreadyCommitted { key: 5 }.is_fatal());
        assert!(!StoreError::ValidationFailed { xact: xact() }.is_fatal());
        assert!(!StoreError::UnknownTransaction { xact: xact() }.is_fatal());
        assert!(!StoreError::WriteTooLate { key: 5 }.is_fatal());
    }

    #[test]
    fn test_abort_classification() {
        assert!(StoreError::DivisionByZero { xact: xact() }.aborts_transaction());
        assert!(StoreError::UncommittedConflict { key: 5 }.aborts_transaction());
        assert!(StoreError::ValidationFailed { xact: xact() }.aborts_transaction());
        assert!(StoreError::AlreadyCommitted { key: 5 }.aborts_transaction());

        assert!(!StoreError::UnknownTransaction { xact: xact() }.aborts_transaction());
        assert!(!StoreError::KeyNotFound { key: 5 }.aborts_transaction());
        assert!(!StoreError::WriteTooLate { key: 5 }.aborts_transaction());
        assert!(!StoreError::NotSupported { operation: "delete" }.aborts_transaction());
    }

    #[test]
    fn test_messages_name_the_subject() {
        let err = StoreError::KeyNotFound { key: 99 };
        assert!(err.to_string().contains("99"));

        let err = StoreError::UnknownTransaction { xact: xact() };
        assert!(err.to_string().contains(&xact().to_string()));
    }
}
