use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" for the store and the derived views.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar day in the local timezone.
    fn today(&self) -> NaiveDate {
        local_day(&self.now())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock. Clones share the same instant, so a test can keep
/// a handle and advance the time a store sees.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

/// Truncates an instant to its calendar day using local year/month/day.
pub fn local_day(instant: &DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_clones_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::seconds(90));

        assert_eq!(clock.now(), start + Duration::seconds(90));
    }

    #[test]
    fn local_day_uses_local_components() {
        let late_evening = Local
            .with_ymd_and_hms(2024, 3, 15, 23, 30, 0)
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            local_day(&late_evening),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }
}
