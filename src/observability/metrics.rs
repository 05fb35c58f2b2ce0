//! Operational counters
//!
//! Per OBSERVABILITY.md:
//! - Counters only, monotonic, exact
//! - Atomic increments, Relaxed ordering (readers want totals, not
//!   ordering against store state)
//! - Reset only by constructing a new store

use std::sync::atomic::{AtomicU64, Ordering};

/// The store's operational counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    txns_begun: AtomicU64,
    txns_committed: AtomicU64,
    txns_rolled_back: AtomicU64,
    validation_failures: AtomicU64,
    write_conflicts: AtomicU64,
    reads_served: AtomicU64,
    writes_applied: AtomicU64,
    queries_executed: AtomicU64,
    queries_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Creates a registry with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a `begin`.
    pub fn record_begin(&self) {
        self.txns_begun.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a successful commit.
    pub fn record_commit(&self) {
        self.txns_committed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a rollback, explicit or as a failure side effect.
    pub fn record_rollback(&self) {
        self.txns_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a commit rejected by validation.
    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a refused write (either conflict shape).
    pub fn record_write_conflict(&self) {
        self.write_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a successfully served point read.
    pub fn record_read(&self) {
        self.reads_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an applied (provisional) write.
    pub fn record_write(&self) {
        self.writes_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a completed predicate query.
    pub fn record_query(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a rejected predicate query.
    pub fn record_query_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns an owned, point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            txns_begun: self.txns_begun.load(Ordering::Relaxed),
            txns_committed: self.txns_committed.load(Ordering::Relaxed),
            txns_rolled_back: self.txns_rolled_back.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            write_conflicts: self.write_conflicts.load(Ordering::Relaxed),
            reads_served: self.reads_served.load(Ordering::Relaxed),
            writes_applied: self.writes_applied.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
        }
    }
}

/// An owned copy of the counters at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Transactions begun.
    pub txns_begun: u64,
    /// Transactions committed.
    pub txns_committed: u64,
    /// Transactions rolled back (explicitly or on failure).
    pub txns_rolled_back: u64,
    /// Commits rejected by validation.
    pub validation_failures: u64,
    /// Writes refused by either conflict rule.
    pub write_conflicts: u64,
    /// Point reads served.
    pub reads_served: u64,
    /// Provisional writes applied.
    pub writes_applied: u64,
    /// Predicate queries completed.
    pub queries_executed: u64,
    /// Predicate queries rejected.
    pub queries_rejected: u64,
}
