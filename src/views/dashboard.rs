use chrono::{DateTime, Utc};

use crate::goals::{Category, Goal};

use super::{active_goals, mean_progress, upcoming_goals};

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
pub const UPCOMING_DISPLAY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

impl CategoryCount {
    /// Rounded share of `total`, in percent.
    pub fn share_of(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }

        ((200 * self.count + total) / (2 * total)) as u8
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    pub average_progress: u8,
    pub total_active: usize,
    pub completed_active: usize,
    pub upcoming: Vec<&'a Goal>,
    pub category_counts: Vec<CategoryCount>,
}

impl DashboardSummary<'_> {
    pub fn has_category_data(&self) -> bool {
        self.category_counts.iter().any(|c| c.count > 0)
    }
}

/// Registered categories come first in registry order, zero counts included.
/// Categories only known through a goal's embedded copy follow in the order
/// they are first seen.
pub fn category_counts(goals: &[Goal], categories: &[Category]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = categories
        .iter()
        .map(|category| CategoryCount {
            category: category.clone(),
            count: 0,
        })
        .collect();

    for goal in active_goals(goals) {
        match counts
            .iter_mut()
            .find(|c| c.category.id == goal.category.id)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: goal.category.clone(),
                count: 1,
            }),
        }
    }

    counts
}

pub fn summarize<'a>(
    goals: &'a [Goal],
    categories: &[Category],
    now: DateTime<Utc>,
    upcoming_days: i64,
) -> DashboardSummary<'a> {
    let mut upcoming = upcoming_goals(goals, now, upcoming_days);
    upcoming.truncate(UPCOMING_DISPLAY_LIMIT);

    DashboardSummary {
        average_progress: mean_progress(active_goals(goals)),
        total_active: active_goals(goals).count(),
        completed_active: active_goals(goals).filter(|g| g.progress >= 100).count(),
        upcoming,
        category_counts: category_counts(goals, categories),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::Duration;

    #[test]
    fn upcoming_is_capped_and_sorted() {
        let now = local(2024, 9, 2, 8);
        let goals: Vec<Goal> = (0..7)
            .rev()
            .map(|i| goal(&i.to_string(), category(0), now + Duration::days(i), 0))
            .collect();

        let summary = summarize(&goals, &[category(0)], now, DEFAULT_UPCOMING_DAYS);

        let ids: Vec<_> = summary.upcoming.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(summary.total_active, 7);
    }

    #[test]
    fn category_counts_skip_archived_and_keep_unknown() {
        let now = local(2024, 9, 2, 8);
        let mut archived = goal("a", category(1), now, 0);
        archived.is_archived = true;
        let stray = Category {
            id: "gone".to_string(),
            name: "Gone".to_string(),
            color: "#000000".to_string(),
        };

        let goals = vec![
            goal("b", category(0), now, 100),
            goal("c", category(0), now, 30),
            goal("d", stray.clone(), now, 0),
            archived,
        ];
        let categories = vec![category(0), category(1)];

        let summary = summarize(&goals, &categories, now, DEFAULT_UPCOMING_DAYS);
        let counts: Vec<_> = summary
            .category_counts
            .iter()
            .map(|c| (c.category.id.as_str(), c.count))
            .collect();

        assert_eq!(counts, vec![("1", 2), ("2", 0), ("gone", 1)]);
        assert_eq!(summary.completed_active, 1);
        assert_eq!(summary.average_progress, 43);
        assert!(summary.has_category_data());
        assert_eq!(summary.category_counts[0].share_of(3), 67);
    }
}
