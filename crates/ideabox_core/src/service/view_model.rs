//! Reactive view-model over an idea repository.
//!
//! # Responsibility
//! - Publish the idea collection, a loading flag and the last error to
//!   subscribed views.
//! - Wrap repository calls so failures become observable state instead of
//!   errors returned to presentation code.
//!
//! # Invariants
//! - After a successful mutation the published snapshot already contains it
//!   when the call returns.
//! - A failed call leaves the published collection untouched and only sets
//!   `error`.
//! - Listeners run synchronously, in subscription order, on the caller's
//!   thread.

use crate::model::idea::{Idea, IdeaId, IdeaInput, IdeaPatch, IdeaStatus};
use crate::repo::idea_repo::{IdeaRepository, RepoError};
use crate::search::IdeaFilter;
use crate::service::kanban::{move_card, DragSession, DropTarget, KanbanBoard, KanbanError, MoveOutcome};
use crate::service::stats::{compute_stats, IdeaStats};
use log::{debug, warn};

/// State published to views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeasSnapshot {
    pub ideas: Vec<Idea>,
    pub loading: bool,
    /// Message of the most recent failure. Cleared by `refresh_ideas`.
    pub error: Option<String>,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&IdeasSnapshot)>;

/// Publish/subscribe adapter between a repository and presentation code.
pub struct IdeaStore<R: IdeaRepository> {
    repo: R,
    snapshot: IdeasSnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    drag: DragSession,
}

impl<R: IdeaRepository> IdeaStore<R> {
    /// Creates an unmounted store with an empty snapshot.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            snapshot: IdeasSnapshot::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            drag: DragSession::new(),
        }
    }

    /// Creates a store and runs the initial load.
    pub fn mounted(repo: R) -> Self {
        let mut store = Self::new(repo);
        store.mount();
        store
    }

    /// Initial load: publishes `loading = true`, then the listed collection.
    pub fn mount(&mut self) {
        self.refresh_ideas();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&IdeasSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(candidate, _)| *candidate != id);
        self.listeners.len() != before
    }

    pub fn snapshot(&self) -> &IdeasSnapshot {
        &self.snapshot
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.snapshot.ideas
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.snapshot.error.as_deref()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Reloads the collection from storage.
    pub fn refresh_ideas(&mut self) {
        self.snapshot.loading = true;
        self.snapshot.error = None;
        self.publish();

        match self.repo.list() {
            Ok(ideas) => self.snapshot.ideas = ideas,
            Err(err) => self.record_error("refresh", &err),
        }

        self.snapshot.loading = false;
        self.publish();
    }

    pub fn create_idea(&mut self, input: &IdeaInput) -> Option<Idea> {
        match self.repo.create(input) {
            Ok(idea) => {
                self.republish();
                Some(idea)
            }
            Err(err) => {
                self.fail("create", &err);
                None
            }
        }
    }

    pub fn update_idea(&mut self, id: &IdeaId, patch: IdeaPatch) -> Option<Idea> {
        match self.repo.update(id, patch) {
            Ok(idea) => {
                self.republish();
                Some(idea)
            }
            Err(err) => {
                self.fail("update", &err);
                None
            }
        }
    }

    /// Returns `false` only when the delete failed; unknown ids succeed.
    pub fn delete_idea(&mut self, id: &IdeaId) -> bool {
        match self.repo.delete(id) {
            Ok(()) => {
                self.republish();
                true
            }
            Err(err) => {
                self.fail("delete", &err);
                false
            }
        }
    }

    /// Looks up one idea; both "not found" and failures yield `None`.
    pub fn get_idea(&mut self, id: &IdeaId) -> Option<Idea> {
        match self.repo.get(id) {
            Ok(idea) => idea,
            Err(err) => {
                self.fail("get", &err);
                None
            }
        }
    }

    pub fn search_ideas(&mut self, query: &str) -> Vec<Idea> {
        match self.repo.search(query) {
            Ok(ideas) => ideas,
            Err(err) => {
                self.fail("search", &err);
                Vec::new()
            }
        }
    }

    pub fn filter_ideas(&mut self, filter: &IdeaFilter) -> Vec<Idea> {
        match self.repo.filter(filter) {
            Ok(ideas) => ideas,
            Err(err) => {
                self.fail("filter", &err);
                Vec::new()
            }
        }
    }

    /// Direct status selection (e.g. from an edit form).
    pub fn change_status(&mut self, id: &IdeaId, status: IdeaStatus) -> Option<Idea> {
        self.update_idea(id, IdeaPatch::status(status))
    }

    /// Kanban move command. Publishes only when a status actually changed.
    pub fn move_card(&mut self, id: &IdeaId, target_status: IdeaStatus) -> Option<MoveOutcome> {
        match move_card(&mut self.repo, id, target_status) {
            Ok(outcome) => {
                if matches!(outcome, MoveOutcome::Moved(_)) {
                    self.republish();
                }
                Some(outcome)
            }
            Err(err) => {
                self.fail("move_card", &err);
                None
            }
        }
    }

    pub fn begin_drag(&mut self, id: IdeaId) -> Result<(), KanbanError> {
        self.drag.begin(id)
    }

    pub fn cancel_drag(&mut self) -> Option<IdeaId> {
        self.drag.cancel()
    }

    pub fn active_drag(&self) -> Option<&IdeaId> {
        self.drag.active()
    }

    /// Finishes the active drag against the published snapshot.
    ///
    /// Returns `Ok(None)` when the drop changes nothing, `Ok(Some(_))` with
    /// the move outcome otherwise; a failed move is reported through the
    /// snapshot error and yields `Ok(None)`.
    pub fn end_drag(&mut self, drop: Option<DropTarget>) -> Result<Option<MoveOutcome>, KanbanError> {
        let command = self.drag.finish(&self.snapshot.ideas, drop.as_ref())?;
        Ok(command.and_then(|command| self.move_card(&command.idea_id, command.target_status)))
    }

    /// Kanban projection of the published snapshot.
    pub fn board(&self) -> KanbanBoard {
        KanbanBoard::from_ideas(&self.snapshot.ideas)
    }

    /// Dashboard aggregates of the published snapshot.
    pub fn stats(&self) -> IdeaStats {
        compute_stats(&self.snapshot.ideas)
    }

    fn republish(&mut self) {
        match self.repo.list() {
            Ok(ideas) => {
                self.snapshot.ideas = ideas;
                self.publish();
            }
            Err(err) => self.fail("refresh", &err),
        }
    }

    fn fail(&mut self, operation: &'static str, err: &RepoError) {
        self.record_error(operation, err);
        self.publish();
    }

    fn record_error(&mut self, operation: &'static str, err: &RepoError) {
        warn!(
            "event=view_model_error module=view_model status=error op={} error_kind={}",
            operation,
            error_kind(err)
        );
        self.snapshot.error = Some(err.to_string());
    }

    fn publish(&mut self) {
        debug!(
            "event=view_model_publish module=view_model listeners={} ideas={} loading={}",
            self.listeners.len(),
            self.snapshot.ideas.len(),
            self.snapshot.loading
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.snapshot);
        }
    }
}

fn error_kind(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation",
        RepoError::NotFound(_) => "not_found",
        RepoError::Io(_) => "io",
    }
}
