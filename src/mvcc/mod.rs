//! MVCC domain types
//!
//! Per PROTOCOL.md §1-§3, this module defines the multi-version
//! vocabulary in code and encodes its invariants structurally:
//!
//! - `Timestamp` / `TxnId` - totally ordered, disjoint identities
//! - `TimestampAuthority` - the single shared ordering counter
//! - `Version` - one value, one one-way Provisional → Committed state
//! - `VersionChain` - creation-ordered history with stable handles
//! - `Snapshot` - a transaction's immutable visibility bound
//! - `Visibility` - deterministic snapshot resolution
//!
//! Nothing in here touches transaction tables or the operation surface;
//! that orchestration lives in `engine`.

mod authority;
mod snapshot;
mod timestamp;
mod version;
mod version_chain;
mod visibility;

pub use authority::TimestampAuthority;
pub use snapshot::Snapshot;
pub use timestamp::{Timestamp, TxnId};
pub use version::{Version, VersionError, VersionState};
pub use version_chain::{VersionChain, VersionSeq};
pub use visibility::{Visibility, VisibilityResult};

/// The key type stored by the engine.
pub type Key = i64;

/// The value type stored by the engine.
pub type Value = i64;
