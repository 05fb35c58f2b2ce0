//! Visibility - Deterministic snapshot resolution
//!
//! Per PROTOCOL.md §3, the committed-chain half of the visibility rule:
//!
//! Given a snapshot `S` and a version chain `V₀ … Vₙ` in creation order,
//! the visible version is the committed version with the **largest**
//! commit timestamp strictly below `S`'s bound. Provisional versions are
//! never visible here — read-your-own-writes is resolved against the
//! transaction's undo buffer before the chain is consulted, in the
//! engine.
//!
//! The rule admits no exceptions:
//! - Readers observe a stable snapshot
//! - No dirty reads (provisional versions are skipped)
//! - No non-repeatable reads (the bound never moves)
//!
//! This is a pure function module with no state; identical inputs
//! resolve identically every time.

use super::{Snapshot, Version, VersionChain};

/// Result of visibility evaluation for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityResult<'a> {
    /// A committed version is visible under the snapshot.
    Visible(&'a Version),
    /// Nothing qualifies: the chain is empty, entirely provisional, or
    /// entirely committed at or above the bound.
    Invisible,
}

impl<'a> VisibilityResult<'a> {
    /// Returns the visible version, if any.
    pub fn version(&self) -> Option<&'a Version> {
        match self {
            VisibilityResult::Visible(v) => Some(v),
            VisibilityResult::Invisible => None,
        }
    }

    /// Returns true if a version is visible.
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityResult::Visible(_))
    }
}

/// Stateless visibility resolver.
pub struct Visibility;

impl Visibility {
    /// Evaluates the committed-chain visibility rule.
    ///
    /// Linear scan; chains are short and creation order carries no
    /// index. Ties are impossible because timestamps are unique
    /// (PROTOCOL.md §2, T1).
    pub fn visible_version<'a>(chain: &'a VersionChain, snapshot: Snapshot) -> VisibilityResult<'a> {
        let winner = chain
            .iter()
            .filter_map(|v| v.commit_timestamp().map(|at| (at, v)))
            .filter(|(at, _)| snapshot.admits(*at))
            .max_by_key(|(at, _)| *at);

        match winner {
            Some((_, version)) => VisibilityResult::Visible(version),
            None => VisibilityResult::Invisible,
        }
    }

    /// Checks a single version against a snapshot.
    pub fn is_version_visible(version: &Version, snapshot: Snapshot) -> bool {
        version
            .commit_timestamp()
            .is_some_and(|at| snapshot.admits(at))
    }
}
