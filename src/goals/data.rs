use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type GoalID = String;
pub type MilestoneID = String;
pub type CategoryID = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
    pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: MilestoneID,
    pub title: String,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// A goal snapshot. `category` is a copy of the registry entry taken when the
/// goal was last written, not a reference into the registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalID,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub target_date: DateTime<Utc>,
    /// Percentage in `0..=100`.
    pub progress: u8,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// A milestone as authored in a goal form. `id` is only present when an edit
/// resubmits a milestone that already exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDraft {
    #[serde(default)]
    pub id: Option<MilestoneID>,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl MilestoneDraft {
    pub fn new(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            is_completed: false,
            due_date: None,
        }
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }
}

impl From<&Milestone> for MilestoneDraft {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: Some(milestone.id.clone()),
            title: milestone.title.clone(),
            is_completed: milestone.is_completed,
            due_date: milestone.due_date,
        }
    }
}

/// Everything needed to create a goal; the store assigns id and timestamps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub target_date: DateTime<Utc>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub milestones: Vec<MilestoneDraft>,
    #[serde(default)]
    pub is_archived: bool,
}

impl GoalDraft {
    pub fn new(title: &str, category: Category, target_date: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            category,
            target_date,
            progress: 0,
            milestones: vec![],
            is_archived: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub target_date: Option<DateTime<Utc>>,
    pub progress: Option<u8>,
    pub milestones: Option<Vec<MilestoneDraft>>,
    pub is_archived: Option<bool>,
}

impl From<GoalDraft> for GoalPatch {
    fn from(draft: GoalDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            category: Some(draft.category),
            target_date: Some(draft.target_date),
            progress: Some(draft.progress),
            milestones: Some(draft.milestones),
            is_archived: Some(draft.is_archived),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub progress: u8,
    /// Set only when this toggle moved progress from below 100 to exactly 100.
    pub completed: bool,
}
