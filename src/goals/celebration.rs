use chrono::{DateTime, Duration, Utc};

use super::data::*;

pub const CELEBRATION_SECS: i64 = 3;

/// One-shot notice that a goal reached 100% through a milestone toggle.
/// It is armed once per edge and expires on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub goal_id: GoalID,
    pub goal_title: String,
    pub started_at: DateTime<Utc>,
}

impl Celebration {
    pub fn new(goal: &Goal, started_at: DateTime<Utc>) -> Self {
        Self {
            goal_id: goal.id.clone(),
            goal_title: goal.title.clone(),
            started_at,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::seconds(CELEBRATION_SECS)
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.started_at && now < self.expires_at()
    }
}
