//! Predicate query tests
//!
//! modquery returns every visible value divisible by the modulus, in
//! ascending key order, under exactly the same visibility rule as point
//! reads. A zero modulus aborts the transaction.

use optikv::{Store, StoreError};

fn seed(store: &mut Store, pairs: &[(i64, i64)]) {
    let t = store.begin();
    for &(key, value) in pairs {
        store.write(t, key, value).unwrap();
    }
    store.commit(t).unwrap();
}

/// Results come back in ascending key order.
#[test]
fn test_results_are_in_ascending_key_order() {
    let mut store = Store::new();
    seed(&mut store, &[(30, 6), (10, 2), (20, 4)]);

    let t = store.begin();
    assert_eq!(store.modquery(t, 2).unwrap(), vec![2, 4, 6]);
}

/// Only divisible values qualify; an empty store yields an empty result.
#[test]
fn test_filters_by_divisibility() {
    let mut store = Store::new();

    let t0 = store.begin();
    assert_eq!(store.modquery(t0, 4).unwrap(), Vec::<i64>::new());
    store.rollback(t0).unwrap();

    seed(&mut store, &[(1, 3), (2, 8), (3, 12), (4, 5)]);

    let t = store.begin();
    assert_eq!(store.modquery(t, 4).unwrap(), vec![8, 12]);
}

/// Negative values divide like any others.
#[test]
fn test_negative_values_qualify() {
    let mut store = Store::new();
    seed(&mut store, &[(1, -8), (2, 7)]);

    let t = store.begin();
    assert_eq!(store.modquery(t, 4).unwrap(), vec![-8]);
}

/// Keys with nothing visible under the snapshot are skipped, not
/// errors.
#[test]
fn test_invisible_keys_are_skipped() {
    let mut store = Store::new();
    seed(&mut store, &[(1, 4)]);

    let t1 = store.begin();

    // Committed after T1 began: invisible to it.
    let writer = store.begin();
    store.write(writer, 2, 8).unwrap();
    store.commit(writer).unwrap();

    // Provisional and foreign: invisible too.
    let other = store.begin();
    store.write(other, 3, 12).unwrap();

    assert_eq!(store.modquery(t1, 4).unwrap(), vec![4]);
}

/// The transaction's own uncommitted writes are part of its query
/// view and shadow the committed versions of the same keys.
#[test]
fn test_own_writes_shadow_committed_values() {
    let mut store = Store::new();
    seed(&mut store, &[(1, 8), (2, 3)]);

    let t = store.begin();
    // 8 -> 5: the key leaves this transaction's own result set.
    store.write(t, 1, 5).unwrap();
    // 3 -> 16: this one enters it.
    store.write(t, 2, 16).unwrap();

    assert_eq!(store.modquery(t, 4).unwrap(), vec![16]);
}

/// A zero modulus rolls the transaction back before the error
/// surfaces; afterwards the handle is unknown.
#[test]
fn test_zero_modulus_aborts_the_transaction() {
    let mut store = Store::new();

    let t = store.begin();
    store.write(t, 1, 10).unwrap();

    let err = store.modquery(t, 0).unwrap_err();
    assert_eq!(err, StoreError::DivisionByZero { xact: t });
    assert_eq!(err.code(), "OPTI_QUERY_ZERO_MODULUS");
    assert!(err.aborts_transaction());

    assert!(!store.is_active(t));
    assert_eq!(store.version_count(1), 0);
    assert_eq!(
        store.read(t, 1),
        Err(StoreError::UnknownTransaction { xact: t })
    );
}

/// An unknown transaction is reported before the modulus is examined.
#[test]
fn test_unknown_transaction_wins_over_zero_modulus() {
    let mut store = Store::new();
    let t = store.begin();
    store.commit(t).unwrap();

    assert_eq!(
        store.modquery(t, 0),
        Err(StoreError::UnknownTransaction { xact: t })
    );
}
