use chrono::{Datelike, Local, NaiveDate};

/// Source of "today" for calculations that depend on the calendar.
///
/// Wizards never read the wall clock themselves; callers resolve the current
/// year through a clock and pass it in explicitly.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Real-time clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a specific date, used by tests and scripted runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn year(year: i32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, 6, 1).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
