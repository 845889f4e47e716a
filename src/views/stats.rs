use crate::goals::{goal_status, Category, Goal, GoalStatus};

use super::{active_goals, mean_progress};

/// Per-category breakdown of active goals. `completed + in_progress +
/// not_started == count` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub average_progress: u8,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

pub fn stats_for(goals: &[Goal], category: &Category) -> CategoryStats {
    let in_category: Vec<&Goal> = active_goals(goals)
        .filter(|goal| goal.category.id == category.id)
        .collect();

    let mut stats = CategoryStats {
        category: category.clone(),
        count: in_category.len(),
        average_progress: mean_progress(in_category.iter().copied()),
        completed: 0,
        in_progress: 0,
        not_started: 0,
    };

    for goal in &in_category {
        match goal_status(goal.progress) {
            GoalStatus::Completed => stats.completed += 1,
            GoalStatus::InProgress => stats.in_progress += 1,
            GoalStatus::NotStarted => stats.not_started += 1,
        }
    }

    stats
}

pub fn category_stats(goals: &[Goal], categories: &[Category]) -> Vec<CategoryStats> {
    categories
        .iter()
        .map(|category| stats_for(goals, category))
        .collect()
}
