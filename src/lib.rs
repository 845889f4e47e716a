//! Goal tracking core: a goal/category store with milestone-driven progress,
//! key-value snapshot persistence, and read-side views for dashboards,
//! per-category stats and a month calendar.

pub mod clock;
pub mod config;
pub mod goals;
pub mod internal_error;
pub mod storage;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use goals::{Category, Goal, GoalDraft, GoalPatch, GoalStore, Milestone, MilestoneDraft};
pub use internal_error::{InternalError, InternalResult};
