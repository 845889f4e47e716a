//! Month grid and day index for the calendar view.
//!
//! Days are keyed by the goal's target date in the local timezone, so a goal
//! due late in the evening lands on the day the user sees, not the UTC day.

use chrono::{Datelike, Months, NaiveDate};

use std::collections::BTreeMap;

use crate::clock::local_day;
use crate::goals::Goal;

use super::active_goals;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(date.day0() as i64),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Moves by any number of months, crossing year boundaries as needed.
    /// `None` only outside the representable date range.
    pub fn offset(&self, months: i32) -> Option<Self> {
        let step = Months::new(months.unsigned_abs());
        let first = if months >= 0 {
            self.first.checked_add_months(step)
        } else {
            self.first.checked_sub_months(step)
        }?;

        Some(Self { first })
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn days_in_month(&self) -> usize {
        self.days().count()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Sunday-first grid cells. Leading `None`s put day 1 under its weekday
    /// and trailing `None`s complete the last week.
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let leading = self.first.weekday().num_days_from_sunday() as usize;

        let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
        cells.extend(self.days().map(Some));

        let remainder = cells.len() % DAYS_PER_WEEK;
        if remainder != 0 {
            cells.resize(cells.len() + DAYS_PER_WEEK - remainder, None);
        }

        cells
    }

    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        self.cells()
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect()
    }
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Active goals grouped by local due day, each day in store order.
#[derive(Debug, Clone, Default)]
pub struct CalendarIndex<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Goal>>,
}

impl<'a> CalendarIndex<'a> {
    pub fn build(goals: &'a [Goal]) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<&'a Goal>> = BTreeMap::new();

        for goal in active_goals(goals) {
            days.entry(local_day(&goal.target_date))
                .or_default()
                .push(goal);
        }

        Self { days }
    }

    pub fn goals_on(&self, date: NaiveDate) -> &[&'a Goal] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days of `month` that have at least one goal due.
    pub fn busy_days(&self, month: &CalendarMonth) -> Vec<(NaiveDate, &[&'a Goal])> {
        self.days
            .range(month.first_day()..)
            .take_while(|(date, _)| month.contains(**date))
            .map(|(date, goals)| (*date, goals.as_slice()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn wednesday_start_pads_three_cells() {
        // May 2024 starts on a Wednesday.
        let month = CalendarMonth::new(2024, 5).unwrap();
        let cells = month.cells();

        assert_eq!(&cells[..3], &[None, None, None]);
        assert_eq!(cells[3], Some(date(2024, 5, 1)));
        assert_eq!(cells.len() % DAYS_PER_WEEK, 0);
        assert_eq!(cells.iter().flatten().count(), 31);
        assert_eq!(month.weeks().len(), 5);
    }

    #[test]
    fn exact_fit_month_has_no_padding() {
        // February 2015 starts on a Sunday and has 28 days.
        let cells = CalendarMonth::new(2015, 2).unwrap().cells();

        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(Option::is_some));
    }

    #[test]
    fn offset_crosses_year_boundaries() {
        let month = CalendarMonth::new(2024, 11).unwrap();

        assert_eq!(month.offset(2), CalendarMonth::new(2025, 1));
        assert_eq!(month.offset(-11), CalendarMonth::new(2023, 12));
        assert_eq!(month.offset(-23), CalendarMonth::new(2022, 12));
        assert_eq!(month.next().unwrap().next(), CalendarMonth::new(2025, 1));
        assert_eq!(month.offset(0), Some(month));
        assert_eq!(CalendarMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(
            CalendarMonth::containing(date(2024, 7, 19)),
            CalendarMonth::new(2024, 7).unwrap()
        );
    }

    #[test]
    fn index_uses_local_day_and_skips_archived() {
        let mut archived = goal("archived", category(0), local(2024, 3, 15, 9), 0);
        archived.is_archived = true;
        let goals = vec![
            goal("late", category(0), local(2024, 3, 15, 23), 0),
            goal("early", category(1), local(2024, 3, 15, 0), 0),
            goal("next-month", category(1), local(2024, 4, 1, 12), 0),
            archived,
        ];

        let index = CalendarIndex::build(&goals);
        assert!(!index.is_empty());
        assert!(CalendarIndex::build(&goals[3..]).is_empty());

        let ids: Vec<_> = index
            .goals_on(date(2024, 3, 15))
            .iter()
            .map(|g| g.id.as_str())
            .collect();

        assert_eq!(ids, vec!["late", "early"]);
        assert!(index.goals_on(date(2024, 3, 16)).is_empty());

        let march = CalendarMonth::new(2024, 3).unwrap();
        let busy = index.busy_days(&march);
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].0, date(2024, 3, 15));
    }
}
