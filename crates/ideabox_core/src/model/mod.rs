//! Domain model for ideas and daily memos.
//!
//! # Responsibility
//! - Define canonical record shapes persisted by the repository layer.
//! - Own pure validation rules; no storage access happens here.
//!
//! # Invariants
//! - `status` and `priority` are closed enums; no other value can be
//!   represented, so none can be persisted.
//! - Deletion is a hard removal; there is no tombstone state.

pub mod idea;
pub mod memo;
