//! Core domain logic for Ideabox.
//! This crate is the single source of truth for idea/memo invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{IdeaboxConfig, StorageLocation};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::idea::{
    normalize_tags, validate_idea_input, Idea, IdeaFields, IdeaId, IdeaInput, IdeaPatch,
    IdeaPriority, IdeaStatus, ValidationError,
};
pub use model::memo::{memo_key, DailyMemo, DAILY_MEMO_KEY_PREFIX};
pub use repo::idea_repo::{IdeaRepository, KvIdeaRepository, RepoError, RepoResult, IDEAS_KEY};
pub use repo::memo_repo::DailyMemoRepository;
pub use search::{recent_ideas, search_ideas, IdeaFilter};
pub use service::kanban::{
    move_card, DragSession, DropTarget, KanbanBoard, KanbanColumn, KanbanError, MoveCommand,
    MoveOutcome,
};
pub use service::stats::{compute_stats, IdeaStats, LabelCount};
pub use service::status::{apply_status_change, is_transition_allowed};
pub use service::view_model::{IdeaStore, IdeasSnapshot, SubscriptionId};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
