use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// Working-day calendar: decides which dates are eligible for work and
/// translates hour estimates into date spans.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
    hours_in_day: f64,
}

impl WorkCalendar {
    pub fn new<I, J>(non_working_days: I, holidays: J, hours_in_day: f64) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: holidays.into_iter().collect(),
            non_working_days: non_working_days.into_iter().collect(),
            hours_in_day,
        }
    }

    pub fn hours_in_day(&self) -> f64 {
        self.hours_in_day
    }

    /// Check if a date is available for scheduling
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// Find the next available date at or after the given date. Returns the
    /// date itself when it is already available.
    pub fn next_available(&self, from: NaiveDate) -> NaiveDate {
        let mut current = from;
        while !self.is_available(current) {
            current = current + Duration::days(1);
        }
        current
    }

    /// Convert an hour estimate into whole working days, rounding up.
    /// Zero hours is zero days.
    pub fn duration_in_days(&self, hours: f64) -> i64 {
        (hours / self.hours_in_day).ceil() as i64
    }

    /// Walk forward from `start`, consuming `days` available days, and return
    /// the date immediately after the last consumed day. The span is
    /// end-exclusive: `days = 0` returns `start` unchanged.
    pub fn span_end(&self, start: NaiveDate, days: i64) -> NaiveDate {
        let mut current = start;
        let mut consumed = 0;
        while consumed < days {
            if self.is_available(current) {
                consumed += 1;
            }
            current = current + Duration::days(1);
        }
        current
    }
}
