//! Idea domain model.
//!
//! # Responsibility
//! - Define the canonical idea record and its status/priority labels.
//! - Validate raw form input into typed fields before persistence.
//! - Merge partial updates without touching identity or creation time.
//!
//! # Invariants
//! - `id` is stable and never reused for another idea.
//! - `created_at <= updated_at`; merges never move `updated_at` backwards.
//! - `tags` holds no duplicates (case-sensitive) and keeps insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque idea identifier.
///
/// Fresh ids are UUID v4 strings, but persisted ids are kept as-is, so any
/// non-empty string already in storage (e.g. the `"1"`..`"5"` samples) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(String);

impl IdeaId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdeaId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdeaId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for IdeaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle label of an idea.
///
/// The set is flat: any status may move to any other status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdeaStatus {
    Draft,
    InProgress,
    Completed,
    Archived,
}

impl IdeaStatus {
    /// All statuses in kanban column order.
    pub const ALL: [IdeaStatus; 4] = [
        IdeaStatus::Draft,
        IdeaStatus::InProgress,
        IdeaStatus::Completed,
        IdeaStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for IdeaStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

impl Display for IdeaStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority label of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaPriority {
    Low,
    Medium,
    High,
}

impl IdeaPriority {
    pub const ALL: [IdeaPriority; 3] = [IdeaPriority::Low, IdeaPriority::Medium, IdeaPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for IdeaPriority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

impl Display for IdeaPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for idea and memo input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
    InvalidStatus(String),
    InvalidPriority(String),
    /// Persisted tags contain the same value twice.
    DuplicateTag(String),
    /// Memo date is not an ISO `YYYY-MM-DD` calendar date.
    InvalidMemoDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected draft|in-progress|completed|archived"
            ),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected low|medium|high")
            }
            Self::DuplicateTag(tag) => write!(f, "duplicate tag `{tag}`"),
            Self::InvalidMemoDate(value) => {
                write!(f, "invalid memo date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ValidationError {}

/// Canonical idea record, serialized with the camelCase field names used by
/// the persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    pub priority: IdeaPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_revenue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Idea {
    /// Builds a new record from validated fields.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    pub fn from_fields(id: IdeaId, fields: IdeaFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            category: fields.category,
            tags: fields.tags,
            status: fields.status,
            priority: fields.priority,
            created_at: now,
            updated_at: now,
            target_market: fields.target_market,
            potential_revenue: fields.potential_revenue,
            resources: fields.resources,
            timeline: fields.timeline,
            notes: fields.notes,
        }
    }

    /// Checks record-level invariants.
    ///
    /// Used on both write paths (after a merge) and read paths (persisted data).
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if !seen.insert(tag.as_str()) {
                return Err(ValidationError::DuplicateTag(tag.clone()));
            }
        }
        Ok(())
    }

    /// Merges `patch` over this record and refreshes `updated_at`.
    ///
    /// # Invariants
    /// - `id` and `created_at` are never touched.
    /// - `updated_at` never moves backwards, even if the clock does.
    pub fn apply_patch(&mut self, patch: IdeaPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        merge_optional(&mut self.target_market, patch.target_market);
        merge_optional(&mut self.potential_revenue, patch.potential_revenue);
        merge_optional(&mut self.resources, patch.resources);
        merge_optional(&mut self.timeline, patch.timeline);
        merge_optional(&mut self.notes, patch.notes);

        self.updated_at = now.max(self.updated_at);
    }

    /// Case-insensitive substring match over title, description and tags.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle_lower))
    }
}

/// Raw create-form input.
///
/// `status`/`priority` stay strings here so the form boundary can report an
/// invalid label as a `ValidationError` instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub priority: String,
    pub target_market: Option<String>,
    pub potential_revenue: Option<String>,
    pub resources: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
}

impl Default for IdeaInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            tags: Vec::new(),
            status: IdeaStatus::Draft.as_str().to_string(),
            priority: IdeaPriority::Medium.as_str().to_string(),
            target_market: None,
            potential_revenue: None,
            resources: None,
            timeline: None,
            notes: None,
        }
    }
}

impl IdeaInput {
    /// Input with the two required fields set and form defaults elsewhere.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Validated, typed idea fields (everything except identity and timestamps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: IdeaStatus,
    pub priority: IdeaPriority,
    pub target_market: Option<String>,
    pub potential_revenue: Option<String>,
    pub resources: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. `None` leaves a field untouched.
///
/// For the optional free-text fields, `Some("")` (or whitespace) clears the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<IdeaStatus>,
    pub priority: Option<IdeaPriority>,
    pub target_market: Option<String>,
    pub potential_revenue: Option<String>,
    pub resources: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
}

impl IdeaPatch {
    /// Patch that only changes the status.
    pub fn status(status: IdeaStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validates raw create input into typed fields.
///
/// Pure function; no side effects.
///
/// # Errors
/// - `EmptyField` when `title` or `description` is blank.
/// - `InvalidStatus` / `InvalidPriority` for labels outside the enumerated sets.
pub fn validate_idea_input(input: &IdeaInput) -> Result<IdeaFields, ValidationError> {
    require_text("title", &input.title)?;
    require_text("description", &input.description)?;
    let status = input.status.parse::<IdeaStatus>()?;
    let priority = input.priority.parse::<IdeaPriority>()?;

    Ok(IdeaFields {
        title: input.title.clone(),
        description: input.description.clone(),
        category: input.category.clone(),
        tags: normalize_tags(&input.tags),
        status,
        priority,
        target_market: non_blank(input.target_market.as_deref()),
        potential_revenue: non_blank(input.potential_revenue.as_deref()),
        resources: non_blank(input.resources.as_deref()),
        timeline: non_blank(input.timeline.as_deref()),
        notes: non_blank(input.notes.as_deref()),
    })
}

/// Trims tags, drops blanks and removes duplicates keeping the first
/// occurrence. Comparison is case-sensitive.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|text| !text.trim().is_empty())
        .map(ToString::to_string)
}

fn merge_optional(slot: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        *slot = non_blank(Some(value.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_tags, validate_idea_input, Idea, IdeaId, IdeaInput, IdeaPatch, IdeaPriority,
        IdeaStatus, ValidationError,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn status_labels_roundtrip_through_strings() {
        for status in IdeaStatus::ALL {
            assert_eq!(status.as_str().parse::<IdeaStatus>().unwrap(), status);
        }
        assert!(matches!(
            "in_progress".parse::<IdeaStatus>(),
            Err(ValidationError::InvalidStatus(_))
        ));
    }

    #[test]
    fn status_serializes_with_kebab_case() {
        let json = serde_json::to_string(&IdeaStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn validate_rejects_blank_title_and_description() {
        let err = validate_idea_input(&IdeaInput::new("   ", "body")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("title"));

        let err = validate_idea_input(&IdeaInput::new("title", "\n\t")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("description"));
    }

    #[test]
    fn validate_rejects_unknown_labels() {
        let input = IdeaInput {
            status: "shipped".to_string(),
            ..IdeaInput::new("t", "d")
        };
        assert!(matches!(
            validate_idea_input(&input),
            Err(ValidationError::InvalidStatus(value)) if value == "shipped"
        ));

        let input = IdeaInput {
            priority: "urgent".to_string(),
            ..IdeaInput::new("t", "d")
        };
        assert!(matches!(
            validate_idea_input(&input),
            Err(ValidationError::InvalidPriority(_))
        ));
    }

    #[test]
    fn validate_applies_form_defaults() {
        let fields = validate_idea_input(&IdeaInput::new("t", "d")).unwrap();
        assert_eq!(fields.status, IdeaStatus::Draft);
        assert_eq!(fields.priority, IdeaPriority::Medium);
        assert_eq!(fields.category, "");
        assert!(fields.tags.is_empty());
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn normalize_tags_dedupes_case_sensitively_in_order() {
        let normalized = normalize_tags(&tags(&["b", " a ", "b", "", "A", "a"]));
        assert_eq!(normalized, tags(&["b", "a", "A"]));
    }

    #[test]
    fn apply_patch_keeps_identity_and_never_rewinds_updated_at() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fields = validate_idea_input(&IdeaInput::new("t", "d")).unwrap();
        let mut idea = Idea::from_fields(IdeaId::from("x"), fields, created);

        let earlier = created - Duration::hours(1);
        idea.apply_patch(IdeaPatch::status(IdeaStatus::Archived), earlier);
        assert_eq!(idea.id.as_str(), "x");
        assert_eq!(idea.created_at, created);
        assert_eq!(idea.updated_at, created);
        assert_eq!(idea.status, IdeaStatus::Archived);

        let later = created + Duration::minutes(5);
        idea.apply_patch(
            IdeaPatch {
                notes: Some("keep".to_string()),
                ..IdeaPatch::default()
            },
            later,
        );
        assert_eq!(idea.updated_at, later);
        assert_eq!(idea.notes.as_deref(), Some("keep"));

        idea.apply_patch(
            IdeaPatch {
                notes: Some("  ".to_string()),
                ..IdeaPatch::default()
            },
            later,
        );
        assert_eq!(idea.notes, None);
    }

    #[test]
    fn validate_record_flags_duplicate_tags() {
        let now = Utc::now();
        let fields = validate_idea_input(&IdeaInput::new("t", "d")).unwrap();
        let mut idea = Idea::from_fields(IdeaId::generate(), fields, now);
        idea.tags = tags(&["x", "x"]);
        assert_eq!(
            idea.validate().unwrap_err(),
            ValidationError::DuplicateTag("x".to_string())
        );
    }

    #[test]
    fn matches_lowercase_checks_title_description_and_tags() {
        let fields = validate_idea_input(&IdeaInput {
            tags: tags(&["Robotics"]),
            ..IdeaInput::new("Delivery Bot", "Autonomous courier")
        })
        .unwrap();
        let idea = Idea::from_fields(IdeaId::generate(), fields, Utc::now());

        assert!(idea.matches_lowercase(""));
        assert!(idea.matches_lowercase("bot"));
        assert!(idea.matches_lowercase("courier"));
        assert!(idea.matches_lowercase("robo"));
        assert!(!idea.matches_lowercase("drone"));
    }
}
