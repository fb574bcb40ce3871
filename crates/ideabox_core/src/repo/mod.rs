//! Repository layer over injected key-value storage.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep storage encoding details out of service/view-model code.
//!
//! # Invariants
//! - Repository writes validate input before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to storage failures (`Io`).

pub mod idea_repo;
pub mod memo_repo;
pub mod seed;
