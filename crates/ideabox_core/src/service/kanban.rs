//! Kanban board projection and drag-and-drop commands.
//!
//! # Responsibility
//! - Group ideas into one column per status.
//! - Reduce a drag gesture to a single `move_card` command.
//!
//! # Invariants
//! - At most one drag is in flight per `DragSession`.
//! - Dropping onto the card's own column (or a card in it) persists nothing;
//!   there is no rank field, so in-column order is not durable.

use crate::model::idea::{Idea, IdeaId, IdeaStatus};
use crate::repo::idea_repo::{IdeaRepository, RepoError, RepoResult};
use crate::service::status::apply_status_change;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One status column and its cards in storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumn {
    pub status: IdeaStatus,
    pub cards: Vec<Idea>,
}

impl KanbanColumn {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

/// Four columns in fixed order: draft, in-progress, completed, archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    pub fn from_ideas(ideas: &[Idea]) -> Self {
        let columns = IdeaStatus::ALL
            .into_iter()
            .map(|status| KanbanColumn {
                status,
                cards: ideas
                    .iter()
                    .filter(|idea| idea.status == status)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, status: IdeaStatus) -> Option<&KanbanColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}

/// Where a dragged card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column(IdeaStatus),
    Card(IdeaId),
}

impl DropTarget {
    /// Status the drop resolves to, or `None` for a card that no longer exists.
    pub fn resolve_status(&self, ideas: &[Idea]) -> Option<IdeaStatus> {
        match self {
            Self::Column(status) => Some(*status),
            Self::Card(id) => ideas
                .iter()
                .find(|idea| &idea.id == id)
                .map(|idea| idea.status),
        }
    }
}

/// A status change produced by a completed drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub idea_id: IdeaId,
    pub target_status: IdeaStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Status changed and was persisted.
    Moved(Idea),
    /// Card already had the target status; nothing was written.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanbanError {
    /// A drag is already active for this card.
    DragInProgress(IdeaId),
    NoActiveDrag,
}

impl Display for KanbanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DragInProgress(id) => write!(f, "drag already in progress for idea {id}"),
            Self::NoActiveDrag => write!(f, "no drag in progress"),
        }
    }
}

impl Error for KanbanError {}

/// Tracks the single in-flight drag.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    active: Option<IdeaId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&IdeaId> {
        self.active.as_ref()
    }

    /// Starts dragging `idea_id`. Fails while another drag is active.
    pub fn begin(&mut self, idea_id: IdeaId) -> Result<(), KanbanError> {
        if let Some(active) = &self.active {
            return Err(KanbanError::DragInProgress(active.clone()));
        }
        self.active = Some(idea_id);
        Ok(())
    }

    /// Abandons the active drag, if any.
    pub fn cancel(&mut self) -> Option<IdeaId> {
        self.active.take()
    }

    /// Ends the active drag and works out whether it changes a status.
    ///
    /// Returns `Ok(None)` when the card was released outside any target, the
    /// dragged card or target card is gone, or the status would not change.
    pub fn finish(
        &mut self,
        ideas: &[Idea],
        drop: Option<&DropTarget>,
    ) -> Result<Option<MoveCommand>, KanbanError> {
        let idea_id = self.active.take().ok_or(KanbanError::NoActiveDrag)?;
        let Some(drop) = drop else {
            return Ok(None);
        };
        let Some(dragged) = ideas.iter().find(|idea| idea.id == idea_id) else {
            return Ok(None);
        };
        let Some(target_status) = drop.resolve_status(ideas) else {
            return Ok(None);
        };
        if target_status == dragged.status {
            return Ok(None);
        }

        Ok(Some(MoveCommand {
            idea_id,
            target_status,
        }))
    }
}

/// Moves a card to `target_status`, persisting only when the status differs.
///
/// # Errors
/// - `NotFound` when `idea_id` does not exist.
pub fn move_card<R: IdeaRepository + ?Sized>(
    repo: &mut R,
    idea_id: &IdeaId,
    target_status: IdeaStatus,
) -> RepoResult<MoveOutcome> {
    let idea = repo
        .get(idea_id)?
        .ok_or_else(|| RepoError::NotFound(idea_id.clone()))?;
    if idea.status == target_status {
        return Ok(MoveOutcome::Unchanged);
    }

    apply_status_change(repo, &idea, target_status).map(MoveOutcome::Moved)
}
