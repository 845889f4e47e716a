use chrono::{DateTime, Duration, Utc};

use super::data::*;
use super::helpers::sync_progress;

fn category(id: &str, name: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        category("1", "Personal", "#3B82F6"),
        category("2", "Work", "#F97316"),
        category("3", "Health", "#10B981"),
        category("4", "Education", "#8B5CF6"),
        category("5", "Finance", "#14B8A6"),
    ]
}

struct SampleGoal {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: usize,
    target_in_days: i64,
    created_days_ago: i64,
    updated_days_ago: i64,
    milestones: &'static [(&'static str, bool)],
}

const SAMPLE_GOALS: &[SampleGoal] = &[
    SampleGoal {
        id: "1",
        title: "Learn React Advanced Patterns",
        description: "Master advanced React patterns like compound components and render props",
        category: 3,
        target_in_days: 30,
        created_days_ago: 10,
        updated_days_ago: 2,
        milestones: &[
            ("Complete React hooks course", true),
            ("Build 3 projects using advanced patterns", false),
            ("Contribute to an open source React project", false),
        ],
    },
    SampleGoal {
        id: "2",
        title: "Run a Half Marathon",
        description: "Train and complete a half marathon in under 2 hours",
        category: 2,
        target_in_days: 90,
        created_days_ago: 30,
        updated_days_ago: 5,
        milestones: &[
            ("Run 5km without stopping", true),
            ("Run 10km under 1 hour", true),
            ("Run 15km under 1.5 hours", false),
            ("Complete half marathon", false),
        ],
    },
    SampleGoal {
        id: "3",
        title: "Save for Vacation",
        description: "Save $3000 for summer vacation to Italy",
        category: 4,
        target_in_days: 120,
        created_days_ago: 60,
        updated_days_ago: 3,
        milestones: &[
            ("Save first $1000", true),
            ("Save second $1000", true),
            ("Save final $1000", false),
        ],
    },
    SampleGoal {
        id: "4",
        title: "Redesign Personal Website",
        description: "Update portfolio website with new projects and improved design",
        category: 0,
        target_in_days: 45,
        created_days_ago: 15,
        updated_days_ago: 15,
        milestones: &[
            ("Gather design inspiration", true),
            ("Create wireframes", false),
            ("Implement new design", false),
            ("Add new portfolio items", false),
        ],
    },
    SampleGoal {
        id: "5",
        title: "Complete Project Proposal",
        description: "Finish and submit the Q3 project proposal for client approval",
        category: 1,
        target_in_days: 10,
        created_days_ago: 20,
        updated_days_ago: 1,
        milestones: &[
            ("Research market trends", true),
            ("Draft initial proposal", true),
            ("Get team feedback", true),
            ("Finalize and submit", false),
        ],
    },
];

/// The starter dataset, dated relative to `now`. Progress is derived from the
/// milestones so the sample data obeys the same invariant as stored goals.
pub fn sample_goals(now: DateTime<Utc>) -> Vec<Goal> {
    let categories = default_categories();

    SAMPLE_GOALS
        .iter()
        .map(|sample| {
            let mut goal = Goal {
                id: sample.id.to_string(),
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                category: categories[sample.category].clone(),
                target_date: now + Duration::days(sample.target_in_days),
                progress: 0,
                milestones: sample
                    .milestones
                    .iter()
                    .enumerate()
                    .map(|(i, (title, is_completed))| Milestone {
                        id: format!("m{}", i + 1),
                        title: title.to_string(),
                        is_completed: *is_completed,
                        due_date: None,
                    })
                    .collect(),
                is_archived: false,
                created_at: now - Duration::days(sample.created_days_ago),
                updated_at: now - Duration::days(sample.updated_days_ago),
            };
            sync_progress(&mut goal);
            goal
        })
        .collect()
}
