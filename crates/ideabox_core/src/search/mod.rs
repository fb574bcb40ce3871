//! In-memory query helpers over an idea collection.
//!
//! # Responsibility
//! - Case-insensitive substring search over title, description and tags.
//! - Status/category/tag filters and recency listings.
//!
//! # Invariants
//! - Results preserve storage order unless a function says otherwise.

pub mod filter;

pub use filter::{recent_ideas, search_ideas, IdeaFilter};
