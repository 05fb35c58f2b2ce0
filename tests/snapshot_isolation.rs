//! Snapshot isolation tests
//!
//! A transaction's view is fixed at begin: committed-before versions
//! plus its own writes, and nothing else, no matter what commits around
//! it.

use optikv::{Store, StoreError};

/// Repeated reads of an untouched key return the same value even when
/// another transaction commits a new version in between.
#[test]
fn test_repeated_reads_are_stable_across_concurrent_commit() {
    let mut store = Store::new();

    let setup = store.begin();
    store.write(setup, 5, 10).unwrap();
    store.commit(setup).unwrap();

    let t1 = store.begin();
    assert_eq!(store.read(t1, 5).unwrap(), 10);

    // Another transaction overwrites and commits.
    let t2 = store.begin();
    store.write(t2, 5, 20).unwrap();
    store.commit(t2).unwrap();

    // T1's snapshot has not moved.
    assert_eq!(store.read(t1, 5).unwrap(), 10);
    assert_eq!(store.read(t1, 5).unwrap(), 10);
}

/// A transaction begun after a commit sees it; one begun before does
/// not.
#[test]
fn test_visibility_is_bounded_by_start() {
    let mut store = Store::new();

    let t1 = store.begin();

    let writer = store.begin();
    store.write(writer, 7, 70).unwrap();
    store.commit(writer).unwrap();

    // T1 began before the commit: nothing visible.
    assert_eq!(store.read(t1, 7), Err(StoreError::KeyNotFound { key: 7 }));

    // A fresh transaction sees it.
    let t2 = store.begin();
    assert_eq!(store.read(t2, 7).unwrap(), 70);
}

/// Read-your-own-writes: a transaction sees its own uncommitted value,
/// and only it does.
#[test]
fn test_read_your_own_writes() {
    let mut store = Store::new();

    let setup = store.begin();
    store.write(setup, 5, 10).unwrap();
    store.commit(setup).unwrap();

    let t1 = store.begin();
    store.write(t1, 5, 99).unwrap();
    assert_eq!(store.read(t1, 5).unwrap(), 99);

    // A reader begun after T1's write still sees the committed value:
    // provisional versions are invisible to everyone but their owner.
    let t2 = store.begin();
    assert_eq!(store.read(t2, 5).unwrap(), 10);
}

/// Overwriting an own provisional write updates what the owner reads.
#[test]
fn test_own_overwrite_is_read_back() {
    let mut store = Store::new();

    let t1 = store.begin();
    store.write(t1, 5, 1).unwrap();
    store.write(t1, 5, 2).unwrap();
    store.write(t1, 5, 3).unwrap();

    assert_eq!(store.read(t1, 5).unwrap(), 3);
}

/// A never-written key has no visible value; the failed read leaves the
/// transaction active.
#[test]
fn test_missing_key_read_is_nonfatal() {
    let mut store = Store::new();
    let t1 = store.begin();

    let err = store.read(t1, 404).unwrap_err();
    assert_eq!(err, StoreError::KeyNotFound { key: 404 });
    assert!(!err.aborts_transaction());
    assert!(store.is_active(t1));

    // The transaction can continue and commit.
    store.write(t1, 404, 1).unwrap();
    store.commit(t1).unwrap();
}

/// Uncommitted values never leak: after the writer rolls back, later
/// transactions find nothing.
#[test]
fn test_rolled_back_write_never_becomes_visible() {
    let mut store = Store::new();

    let t1 = store.begin();
    store.write(t1, 5, 10).unwrap();
    store.rollback(t1).unwrap();

    let t2 = store.begin();
    assert_eq!(store.read(t2, 5), Err(StoreError::KeyNotFound { key: 5 }));
}

/// The newest committed version strictly below the snapshot wins, not
/// just any older one.
#[test]
fn test_newest_qualifying_version_wins() {
    let mut store = Store::new();

    for value in [10, 20, 30] {
        let t = store.begin();
        store.write(t, 5, value).unwrap();
        store.commit(t).unwrap();
    }

    let t1 = store.begin();
    assert_eq!(store.read(t1, 5).unwrap(), 30);
}
