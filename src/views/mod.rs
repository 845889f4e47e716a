//! Read-side projections over a goal/category snapshot.
//!
//! Everything here is recomputed from scratch on each call. Archived goals
//! are left out of every aggregate, average progress included.

use chrono::{DateTime, Duration, Utc};

use crate::goals::Goal;

pub mod calendar;
pub mod dashboard;
pub mod stats;

pub use calendar::{is_today, CalendarIndex, CalendarMonth};
pub use dashboard::{summarize, CategoryCount, DashboardSummary};
pub use stats::{category_stats, stats_for, CategoryStats};

pub fn active_goals(goals: &[Goal]) -> impl Iterator<Item = &Goal> {
    goals.iter().filter(|goal| !goal.is_archived)
}

/// Active goals due in `[now, now + days]`, soonest first. Goals sharing a
/// target date keep store order. A window reaching past the representable
/// date range has no upper bound.
pub fn upcoming_goals(goals: &[Goal], now: DateTime<Utc>, days: i64) -> Vec<&Goal> {
    let until = Duration::try_days(days).and_then(|window| now.checked_add_signed(window));

    let mut upcoming: Vec<&Goal> = active_goals(goals)
        .filter(|goal| goal.target_date >= now)
        .filter(|goal| until.map_or(true, |until| goal.target_date <= until))
        .collect();
    upcoming.sort_by_key(|goal| goal.target_date);

    upcoming
}

/// Rounded mean progress of `goals`; 0 for an empty set.
pub fn mean_progress<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> u8 {
    let (total, count) = goals
        .into_iter()
        .fold((0usize, 0usize), |(total, count), goal| {
            (total + goal.progress as usize, count + 1)
        });

    if count == 0 {
        return 0;
    }

    ((2 * total + count) / (2 * count)) as u8
}

pub fn average_progress(goals: &[Goal]) -> u8 {
    mean_progress(active_goals(goals))
}
