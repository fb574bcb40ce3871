//! Dashboard aggregates over an idea snapshot.

use crate::model::idea::{Idea, IdeaPriority, IdeaStatus};

const TOP_CATEGORY_LIMIT: usize = 6;
const TOP_TAG_LIMIT: usize = 8;
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub draft: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub archived: usize,
}

impl StatusCounts {
    pub fn get(&self, status: IdeaStatus) -> usize {
        match status {
            IdeaStatus::Draft => self.draft,
            IdeaStatus::InProgress => self.in_progress,
            IdeaStatus::Completed => self.completed,
            IdeaStatus::Archived => self.archived,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: IdeaPriority) -> usize {
        match priority {
            IdeaPriority::Low => self.low,
            IdeaPriority::Medium => self.medium,
            IdeaPriority::High => self.high,
        }
    }
}

/// Label with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    /// `completed / total` as a whole percentage, rounded half up; 0 when empty.
    pub completion_rate: u32,
    /// Most used categories, highest count first; ties keep first-seen order.
    pub top_categories: Vec<LabelCount>,
    /// Most used tags, highest count first; ties keep first-seen order.
    pub top_tags: Vec<LabelCount>,
    /// Most recently updated ideas, newest first.
    pub recent: Vec<Idea>,
}

pub fn compute_stats(ideas: &[Idea]) -> IdeaStats {
    let mut by_status = StatusCounts::default();
    let mut by_priority = PriorityCounts::default();
    let mut categories = Vec::new();
    let mut tags = Vec::new();

    for idea in ideas {
        match idea.status {
            IdeaStatus::Draft => by_status.draft += 1,
            IdeaStatus::InProgress => by_status.in_progress += 1,
            IdeaStatus::Completed => by_status.completed += 1,
            IdeaStatus::Archived => by_status.archived += 1,
        }
        match idea.priority {
            IdeaPriority::Low => by_priority.low += 1,
            IdeaPriority::Medium => by_priority.medium += 1,
            IdeaPriority::High => by_priority.high += 1,
        }
        bump(&mut categories, &idea.category);
        for tag in &idea.tags {
            bump(&mut tags, tag);
        }
    }

    let mut recent = ideas.to_vec();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent.truncate(RECENT_LIMIT);

    IdeaStats {
        total: ideas.len(),
        completion_rate: percentage(by_status.completed, ideas.len()),
        by_status,
        by_priority,
        top_categories: top(categories, TOP_CATEGORY_LIMIT),
        top_tags: top(tags, TOP_TAG_LIMIT),
        recent,
    }
}

fn bump(counts: &mut Vec<LabelCount>, label: &str) {
    match counts.iter_mut().find(|entry| entry.label == label) {
        Some(entry) => entry.count += 1,
        None => counts.push(LabelCount {
            label: label.to_string(),
            count: 1,
        }),
    }
}

fn top(mut counts: Vec<LabelCount>, limit: usize) -> Vec<LabelCount> {
    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 200 + total) / (total * 2)) as u32
}
