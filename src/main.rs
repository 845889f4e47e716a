use std::io::{self, Write};

use chrono::Datelike;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rgoals::goals::{days_remaining, milestone_counts};
use rgoals::storage::SqliteStorage;
use rgoals::views::{is_today, CalendarMonth};
use rgoals::{Config, GoalStore, InternalResult, SystemClock};

fn print_dashboard(out: &mut impl Write, store: &GoalStore, config: &Config) -> InternalResult<()> {
    let summary = store.dashboard(config.upcoming_days);
    let today = store.today();

    writeln!(
        out,
        "Active goals: {} ({} completed), average progress {}%",
        summary.total_active, summary.completed_active, summary.average_progress
    )?;

    writeln!(out, "\nUpcoming (next {} days):", config.upcoming_days)?;
    if summary.upcoming.is_empty() {
        writeln!(out, "  nothing due")?;
    }
    for goal in &summary.upcoming {
        let (done, total) = milestone_counts(goal);
        writeln!(
            out,
            "  {} [{}] due in {} days, {}% ({}/{} milestones)",
            goal.title,
            goal.category.name,
            days_remaining(goal, today),
            goal.progress,
            done,
            total
        )?;
    }

    writeln!(out, "\nBy category:")?;
    for stats in store.category_stats() {
        writeln!(
            out,
            "  {:<10} {:>2} goals, avg {:>3}%  done {} / active {} / not started {}",
            stats.category.name,
            stats.count,
            stats.average_progress,
            stats.completed,
            stats.in_progress,
            stats.not_started
        )?;
    }

    Ok(())
}

fn print_calendar(out: &mut impl Write, store: &GoalStore) -> InternalResult<()> {
    let today = store.today();
    let month = CalendarMonth::containing(today);
    let index = store.calendar_index();

    writeln!(out, "\n{}-{:02}", month.year(), month.month())?;
    writeln!(out, " Sun Mon Tue Wed Thu Fri Sat")?;
    for week in month.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let marker = if is_today(*day, today) {
                        '*'
                    } else if index.goals_on(*day).is_empty() {
                        ' '
                    } else {
                        '!'
                    };
                    format!(" {:>2}{}", day.day(), marker)
                }
                None => "    ".to_string(),
            })
            .collect();
        writeln!(out, "{}", row)?;
    }

    if index.is_empty() {
        writeln!(out, "  no active goals scheduled")?;
    }
    for (day, goals) in index.busy_days(&month) {
        for goal in goals {
            writeln!(out, "  {} {}", day, goal.title)?;
        }
    }

    Ok(())
}

fn main() -> InternalResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    info!(db = %config.db_path.display(), "opening goal database");

    let storage = SqliteStorage::open(&config.db_path)?;
    let store = GoalStore::load(Box::new(storage), Box::new(SystemClock));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_dashboard(&mut out, &store, &config)?;
    print_calendar(&mut out, &store)?;

    Ok(())
}
