//! optikv - an in-memory integer key-value store with optimistic
//! multi-version concurrency control
//!
//! Transactions get snapshot-style isolation: each sees the versions
//! committed strictly before it began, plus its own uncommitted writes.
//! Conflicts are detected at commit time by backward validation rather
//! than prevented with locks; a transaction that loses is rolled back
//! completely. The protocol is specified in docs/PROTOCOL.md, the error
//! taxonomy in docs/ERRORS.md.
//!
//! ```
//! use optikv::Store;
//!
//! let mut store = Store::new();
//! let t1 = store.begin();
//! store.write(t1, 99, 42)?;
//! store.commit(t1)?;
//!
//! let t2 = store.begin();
//! assert_eq!(store.read(t2, 99)?, 42);
//! assert_eq!(store.modquery(t2, 21)?, vec![42]);
//! # Ok::<(), optikv::StoreError>(())
//! ```

pub mod engine;
pub mod mvcc;
pub mod observability;
pub mod txn;

pub use engine::{SharedStore, Store, StoreConfig, StoreError, StoreResult};
pub use mvcc::{Key, Timestamp, TxnId, Value};
