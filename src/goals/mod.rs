mod celebration;
mod data;
mod defaults;
mod helpers;
mod store;

pub use celebration::{Celebration, CELEBRATION_SECS};
pub use data::*;
pub use defaults::{default_categories, sample_goals};
pub use helpers::{compute_progress, days_remaining, goal_status, milestone_counts};
pub use store::GoalStore;
