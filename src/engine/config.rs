//! Store configuration
//!
//! One knob. Per PROTOCOL.md §4, a write refused because a newer
//! committed version exists (`OPTI_WRITE_TOO_LATE`) leaves the writing
//! transaction active under the default policy; the strict policy rolls
//! it back as well. Both behaviors are legitimate readings of the
//! conflict — "refused" versus "refused and aborted" — so the choice is
//! explicit configuration rather than a hidden constant.

/// Configuration for a [`Store`](super::Store).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether a `WriteTooLate` conflict also rolls the writer back.
    pub strict_write_conflicts: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            strict_write_conflicts: false,
        }
    }
}

impl StoreConfig {
    /// The default policy: write-too-late refuses the write but leaves
    /// the transaction active.
    pub fn relaxed() -> Self {
        Self::default()
    }

    /// The strict policy: write-too-late rolls the writer back before
    /// the error is surfaced.
    pub fn strict() -> Self {
        Self {
            strict_write_conflicts: true,
        }
    }

    /// Returns true when write-too-late aborts the writer.
    pub fn strict_write_conflicts(&self) -> bool {
        self.strict_write_conflicts
    }
}
