//! Core use-case services.
//!
//! # Responsibility
//! - Status transitions and kanban drag-and-drop on top of the repository.
//! - Dashboard aggregates.
//! - The reactive view-model consumed by presentation code.

pub mod kanban;
pub mod stats;
pub mod status;
pub mod view_model;
