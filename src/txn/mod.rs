//! Transaction records and commit-time validation
//!
//! Per PROTOCOL.md §5. The types here know nothing about the operation
//! surface; the engine feeds them and moves them between tables.

mod record;
mod validation;

pub use record::{ActiveTransaction, CommittedTransaction};
pub use validation::{find_conflict, Conflict};
