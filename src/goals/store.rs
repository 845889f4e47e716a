//! The goal store: the single owner of goals and categories.
//!
//! Every mutation replaces the in-memory state in one step and then writes
//! both collections in full. A failed write is logged and the in-memory
//! state stays authoritative for the rest of the session. If the stored
//! snapshot could not be read at all, nothing is written for the session so
//! the unread data survives. Unknown ids are
//! silent no-ops; each mutation reports whether it changed anything.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::storage::{read_snapshot, write_snapshot, KeyValueStorage, CATEGORIES_KEY, GOALS_KEY};
use crate::views::{self, CalendarIndex, CategoryStats, DashboardSummary};

use super::celebration::Celebration;
use super::data::*;
use super::defaults::{default_categories, sample_goals};
use super::helpers::*;

pub struct GoalStore {
    goals: Vec<Goal>,
    categories: Vec<Category>,
    storage: Box<dyn KeyValueStorage>,
    clock: Box<dyn Clock>,
    celebration: Option<Celebration>,
    writable: bool,
}

impl GoalStore {
    pub fn new(
        goals: Vec<Goal>,
        categories: Vec<Category>,
        storage: Box<dyn KeyValueStorage>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut goals = goals;
        goals.iter_mut().for_each(normalize);

        Self {
            goals,
            categories,
            storage,
            clock,
            celebration: None,
            writable: true,
        }
    }

    /// Restores both collections from `storage`. A key that is missing or
    /// does not decode falls back to the built-in defaults on its own, and
    /// the resulting state is written back immediately. When the backend
    /// fails to read, the defaults are used in memory only.
    pub fn load(storage: Box<dyn KeyValueStorage>, clock: Box<dyn Clock>) -> Self {
        let mut writable = true;

        let goals = match read_snapshot::<Vec<Goal>>(&*storage, GOALS_KEY) {
            Ok(goals) => goals.unwrap_or_else(|| sample_goals(clock.now())),
            Err(e) => {
                error!(error = %e, "failed to read goals, running without persistence");
                writable = false;
                sample_goals(clock.now())
            }
        };
        let categories = match read_snapshot::<Vec<Category>>(&*storage, CATEGORIES_KEY) {
            Ok(categories) => categories.unwrap_or_else(default_categories),
            Err(e) => {
                error!(error = %e, "failed to read categories, running without persistence");
                writable = false;
                default_categories()
            }
        };

        info!(
            goals = goals.len(),
            categories = categories.len(),
            "loaded goal store"
        );

        let mut store = Self::new(goals, categories, storage, clock);
        store.writable = writable;
        store.persist();
        store
    }

    fn persist(&mut self) {
        if !self.writable {
            debug!("persistence disabled for this session, skipping write");
            return;
        }

        if let Err(e) = write_snapshot(&mut *self.storage, GOALS_KEY, &self.goals) {
            warn!(error = %e, "failed to persist goals, keeping in-memory state");
        }
        if let Err(e) = write_snapshot(&mut *self.storage, CATEGORIES_KEY, &self.categories) {
            warn!(error = %e, "failed to persist categories, keeping in-memory state");
        }
    }

    /// Whether mutations are still written to storage.
    pub fn is_persisting(&self) -> bool {
        self.writable
    }

    fn goal_mut(&mut self, id: &str) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn active_goals(&self) -> Vec<&Goal> {
        views::active_goals(&self.goals).collect()
    }

    pub fn archived_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|goal| goal.is_archived).collect()
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> GoalID {
        let now = self.clock.now();

        let mut goal = Goal {
            id: new_id(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            target_date: draft.target_date,
            progress: draft.progress.min(100),
            milestones: materialize_milestones(draft.milestones),
            is_archived: draft.is_archived,
            created_at: now,
            updated_at: now,
        };
        sync_progress(&mut goal);

        let id = goal.id.clone();
        debug!(goal_id = %id, title = %goal.title, "added goal");

        self.goals.push(goal);
        self.persist();

        id
    }

    /// Merges `patch` into the goal. When the goal ends up with milestones,
    /// progress is re-derived from them regardless of `patch.progress`.
    pub fn update_goal(&mut self, id: &str, patch: GoalPatch) -> bool {
        let now = self.clock.now();

        match self.goal_mut(id) {
            Some(goal) => {
                apply_patch(goal, patch, now);
                debug!(goal_id = %id, progress = goal.progress, "updated goal");
            }
            None => {
                debug!(goal_id = %id, "update ignored, no such goal");
                return false;
            }
        }

        self.persist();
        true
    }

    pub fn delete_goal(&mut self, id: &str) -> bool {
        let before = self.goals.len();
        self.goals.retain(|goal| goal.id != id);

        if self.goals.len() == before {
            return false;
        }

        debug!(goal_id = %id, "deleted goal");
        self.persist();
        true
    }

    pub fn archive_goal(&mut self, id: &str) -> bool {
        self.update_goal(
            id,
            GoalPatch {
                is_archived: Some(true),
                ..GoalPatch::default()
            },
        )
    }

    /// Appends a milestone with a fresh id and re-derives progress.
    pub fn add_milestone(&mut self, goal_id: &str, draft: MilestoneDraft) -> Option<MilestoneID> {
        let now = self.clock.now();
        let goal = self.goal_mut(goal_id)?;

        let milestone = Milestone {
            id: new_id(),
            title: draft.title,
            is_completed: draft.is_completed,
            due_date: draft.due_date,
        };
        let milestone_id = milestone.id.clone();

        goal.milestones.push(milestone);
        sync_progress(goal);
        touch(goal, now);
        debug!(%goal_id, %milestone_id, progress = goal.progress, "added milestone");

        self.persist();
        Some(milestone_id)
    }

    /// Flips one milestone and re-derives progress. Arms the completion
    /// celebration when progress moves from below 100 to exactly 100.
    pub fn toggle_milestone(&mut self, goal_id: &str, milestone_id: &str) -> Option<ToggleOutcome> {
        let now = self.clock.now();
        let goal = self.goal_mut(goal_id)?;
        let milestone = goal.milestones.iter_mut().find(|m| m.id == milestone_id)?;

        milestone.is_completed = !milestone.is_completed;

        let previous = goal.progress;
        let progress = sync_progress(goal);
        touch(goal, now);

        let completed = previous != 100 && progress == 100;
        let celebration = if completed {
            info!(%goal_id, title = %goal.title, "goal completed");
            Some(Celebration::new(goal, now))
        } else {
            None
        };

        if celebration.is_some() {
            self.celebration = celebration;
        }
        self.persist();
        Some(ToggleOutcome {
            progress,
            completed,
        })
    }

    pub fn add_category(&mut self, draft: CategoryDraft) -> CategoryID {
        let category = Category {
            id: new_id(),
            name: draft.name,
            color: draft.color,
        };
        let id = category.id.clone();
        debug!(category_id = %id, name = %category.name, "added category");

        self.categories.push(category);
        self.persist();

        id
    }

    /// Edits the registry entry only. Goals keep the category copy they were
    /// written with.
    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> bool {
        let category = match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => category,
            None => return false,
        };

        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        debug!(category_id = %id, name = %category.name, "updated category");

        self.persist();
        true
    }

    pub fn goals_by_category(&self, category_id: &str) -> Vec<&Goal> {
        views::active_goals(&self.goals)
            .filter(|goal| goal.category.id == category_id)
            .collect()
    }

    pub fn upcoming_goals(&self, days: i64) -> Vec<&Goal> {
        views::upcoming_goals(&self.goals, self.clock.now(), days)
    }

    /// The current celebration, if one was armed less than its duration ago.
    pub fn active_celebration(&self) -> Option<&Celebration> {
        let now = self.clock.now();

        self.celebration
            .as_ref()
            .filter(|celebration| celebration.is_active(now))
    }

    pub fn dashboard(&self, upcoming_days: i64) -> DashboardSummary<'_> {
        views::summarize(&self.goals, &self.categories, self.clock.now(), upcoming_days)
    }

    pub fn category_stats(&self) -> Vec<CategoryStats> {
        views::category_stats(&self.goals, &self.categories)
    }

    pub fn calendar_index(&self) -> CalendarIndex<'_> {
        CalendarIndex::build(&self.goals)
    }
}
