use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use std::collections::HashSet;

use crate::clock::local_day;

use super::data::*;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// `round(100 * completed / total)`, rounding halves up. `None` when there are
/// no milestones, in which case progress is set by hand.
pub fn compute_progress(milestones: &[Milestone]) -> Option<u8> {
    let total = milestones.len();
    if total == 0 {
        return None;
    }

    let completed = milestones.iter().filter(|m| m.is_completed).count();

    Some(((200 * completed + total) / (2 * total)) as u8)
}

pub fn milestone_counts(goal: &Goal) -> (usize, usize) {
    let completed = goal.milestones.iter().filter(|m| m.is_completed).count();

    (completed, goal.milestones.len())
}

pub fn goal_status(progress: u8) -> GoalStatus {
    match progress {
        0 => GoalStatus::NotStarted,
        p if p >= 100 => GoalStatus::Completed,
        _ => GoalStatus::InProgress,
    }
}

/// Whole local calendar days from `today` until the goal's target day.
/// Negative when the goal is overdue.
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> i64 {
    local_day(&goal.target_date)
        .signed_duration_since(today)
        .num_days()
}

/// Turns drafts into owned milestones. Ids supplied by the draft survive as
/// long as they are non-empty and unique within the list; everything else gets
/// a fresh id.
pub fn materialize_milestones(drafts: Vec<MilestoneDraft>) -> Vec<Milestone> {
    let mut seen = HashSet::new();

    drafts
        .into_iter()
        .map(|draft| {
            let id = match draft.id {
                Some(id) if !id.is_empty() && !seen.contains(&id) => id,
                _ => new_id(),
            };
            seen.insert(id.clone());

            Milestone {
                id,
                title: draft.title,
                is_completed: draft.is_completed,
                due_date: draft.due_date,
            }
        })
        .collect()
}

/// Re-derives progress from milestones when there are any. Returns the
/// resulting progress.
pub fn sync_progress(goal: &mut Goal) -> u8 {
    if let Some(progress) = compute_progress(&goal.milestones) {
        goal.progress = progress;
    }

    goal.progress
}

pub fn touch(goal: &mut Goal, now: DateTime<Utc>) {
    goal.updated_at = now.max(goal.created_at);
}

/// Repairs a goal read from outside the store: progress is clamped to 100 and
/// re-derived from milestones, and `updated_at` is kept at or after
/// `created_at`.
pub fn normalize(goal: &mut Goal) {
    goal.progress = goal.progress.min(100);
    sync_progress(goal);
    goal.updated_at = goal.updated_at.max(goal.created_at);
}

pub fn apply_patch(goal: &mut Goal, patch: GoalPatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
        goal.title = title;
    }
    if let Some(description) = patch.description {
        goal.description = description;
    }
    if let Some(category) = patch.category {
        goal.category = category;
    }
    if let Some(target_date) = patch.target_date {
        goal.target_date = target_date;
    }
    if let Some(progress) = patch.progress {
        goal.progress = progress.min(100);
    }
    if let Some(milestones) = patch.milestones {
        goal.milestones = materialize_milestones(milestones);
    }
    if let Some(is_archived) = patch.is_archived {
        goal.is_archived = is_archived;
    }

    sync_progress(goal);
    touch(goal, now);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(is_completed: bool) -> Milestone {
        Milestone {
            id: new_id(),
            title: "step".to_string(),
            is_completed,
            due_date: None,
        }
    }

    #[test]
    fn progress_rounds_like_a_percentage() {
        assert_eq!(compute_progress(&[]), None);
        assert_eq!(compute_progress(&[milestone(true), milestone(false)]), Some(50));
        assert_eq!(
            compute_progress(&[milestone(true), milestone(false), milestone(false)]),
            Some(33)
        );
        assert_eq!(
            compute_progress(&[milestone(true), milestone(true), milestone(false)]),
            Some(67)
        );
        assert_eq!(
            compute_progress(&[
                milestone(true),
                milestone(false),
                milestone(false),
                milestone(false),
                milestone(false),
                milestone(false),
                milestone(false),
                milestone(false),
            ]),
            Some(13)
        );
    }

    #[test]
    fn status_follows_progress() {
        assert_eq!(goal_status(0), GoalStatus::NotStarted);
        assert_eq!(goal_status(1), GoalStatus::InProgress);
        assert_eq!(goal_status(99), GoalStatus::InProgress);
        assert_eq!(goal_status(100), GoalStatus::Completed);
    }

    #[test]
    fn materialize_keeps_unique_ids_only() {
        let drafts = vec![
            MilestoneDraft {
                id: Some("m1".to_string()),
                ..MilestoneDraft::new("first")
            },
            MilestoneDraft {
                id: Some("m1".to_string()),
                ..MilestoneDraft::new("duplicate")
            },
            MilestoneDraft {
                id: Some(String::new()),
                ..MilestoneDraft::new("blank")
            },
            MilestoneDraft::new("fresh").completed(),
        ];

        let milestones = materialize_milestones(drafts);

        assert_eq!(milestones[0].id, "m1");
        assert_ne!(milestones[1].id, "m1");
        assert!(!milestones[2].id.is_empty());
        assert!(milestones[3].is_completed);

        let unique: HashSet<_> = milestones.iter().map(|m| m.id.clone()).collect();
        assert_eq!(unique.len(), 4);
    }
}
