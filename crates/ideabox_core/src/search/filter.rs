use crate::model::idea::{Idea, IdeaStatus};

/// Returns ideas whose title, description or any tag contains `query`,
/// ignoring case. An empty query matches everything.
pub fn search_ideas(ideas: &[Idea], query: &str) -> Vec<Idea> {
    let needle = query.to_lowercase();
    ideas
        .iter()
        .filter(|idea| idea.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Returns the `limit` most recently created ideas, newest first.
pub fn recent_ideas(ideas: &[Idea], limit: usize) -> Vec<Idea> {
    let mut sorted = ideas.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Exact-match listing filter. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub status: Option<IdeaStatus>,
    pub category: Option<String>,
    /// Case-sensitive tag membership.
    pub tag: Option<String>,
}

impl IdeaFilter {
    pub fn by_status(status: IdeaStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        if self.status.is_some_and(|status| idea.status != status) {
            return false;
        }
        if let Some(category) = &self.category {
            if &idea.category != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !idea.tags.iter().any(|candidate| candidate == tag) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, ideas: &[Idea]) -> Vec<Idea> {
        ideas
            .iter()
            .filter(|idea| self.matches(idea))
            .cloned()
            .collect()
    }
}
