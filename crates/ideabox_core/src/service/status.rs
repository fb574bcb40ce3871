//! Idea status state machine.
//!
//! # Invariants
//! - Statuses are labels, not an ordered workflow: every transition between
//!   the four states is legal, including a transition to the same state.
//! - A status change is exactly a repository update of the `status` field.

use crate::model::idea::{Idea, IdeaPatch, IdeaStatus};
use crate::repo::idea_repo::{IdeaRepository, RepoResult};

/// Whether `from -> to` is permitted. Always `true`.
pub fn is_transition_allowed(from: IdeaStatus, to: IdeaStatus) -> bool {
    let _ = (from, to);
    true
}

/// Statuses reachable from `from`, in column order.
pub fn allowed_targets(from: IdeaStatus) -> Vec<IdeaStatus> {
    IdeaStatus::ALL
        .into_iter()
        .filter(|to| is_transition_allowed(from, *to))
        .collect()
}

/// Moves `idea` to `new_status` and returns the persisted record.
///
/// Equivalent to `repo.update(&idea.id, IdeaPatch::status(new_status))`, so
/// `updated_at` is refreshed even when the status does not change.
pub fn apply_status_change<R: IdeaRepository + ?Sized>(
    repo: &mut R,
    idea: &Idea,
    new_status: IdeaStatus,
) -> RepoResult<Idea> {
    debug_assert!(is_transition_allowed(idea.status, new_status));
    repo.update(&idea.id, IdeaPatch::status(new_status))
}
