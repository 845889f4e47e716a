use tracing::warn;

use std::env;
use std::path::PathBuf;

use crate::views::dashboard::DEFAULT_UPCOMING_DAYS;

pub const DB_PATH_VAR: &str = "RGOALS_DB";
pub const UPCOMING_DAYS_VAR: &str = "RGOALS_UPCOMING_DAYS";
pub const DEFAULT_DB_PATH: &str = "rgoals.db";
/// Upper bound accepted for the dashboard window, roughly a century.
pub const MAX_UPCOMING_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub upcoming_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source; unset or invalid values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(path) = lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(UPCOMING_DAYS_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(days) if (0..=MAX_UPCOMING_DAYS).contains(&days) => {
                    config.upcoming_days = days
                }
                _ => warn!(value = %raw, "ignoring invalid {}", UPCOMING_DAYS_VAR),
            }
        }

        config
    }
}
